//! The array lifecycle object.

use lattice_core::{ArraySchema, Encryption, OpenMode};
use lattice_engine::{resolve_raw, ArrayHandle, Context, EngineError, EngineResult};

/// Options for [`Array::open`].
///
/// Encryption keys and attribute filters are accepted for interface
/// completeness but not implemented; presenting either fails before any
/// engine call. The timestamp is forwarded to the engine and recorded on
/// the session.
#[derive(Clone, Debug, Default)]
pub struct OpenOptions {
    pub encryption: Encryption,
    pub timestamp: Option<u64>,
    pub attribute_filter: Option<Vec<String>>,
}

/// An array bound to a URI.
///
/// Constructed only by [`Array::open`]; a successful [`Array::create`]
/// persists metadata and retains nothing. The array owns exactly one
/// engine handle, released exactly once on drop. After [`Array::close`]
/// the session is gone and the array must be reopened with a fresh
/// [`Array::open`] call.
#[derive(Debug)]
pub struct Array {
    uri: String,
    ctx: Context,
    handle: Option<ArrayHandle>,
    mode: OpenMode,
    schema: Option<ArraySchema>,
}

impl Array {
    /// Persist `schema` as a new array at `uri`.
    ///
    /// The array stays closed; no handle is retained. Encrypted creation is
    /// not implemented and fails before reaching the engine. The blocking
    /// engine call runs on the blocking pool.
    pub async fn create(
        uri: impl Into<String>,
        schema: &ArraySchema,
        encryption: Encryption,
        ctx: &Context,
    ) -> EngineResult<()> {
        encryption.ensure_supported()?;

        let uri = uri.into();
        let schema = schema.clone();
        let call_ctx = ctx.clone();
        let raw = tokio::task::spawn_blocking(move || {
            call_ctx
                .engine()
                .create_array(&call_ctx, &uri, &schema, &Encryption::None)
        })
        .await
        .map_err(|e| EngineError::Engine(format!("blocking engine call failed: {e}")))?;

        raw.map_err(|raw| resolve_raw(ctx, raw))
    }

    /// Open the array at `uri`, fetching its persisted schema.
    ///
    /// The mode is derived from `mode`: a leading `'w'` means write,
    /// anything else read. Encryption keys and attribute filters fail with
    /// a not-implemented error. The blocking open call runs on the blocking
    /// pool; the schema fetch and all later calls on the returned array
    /// execute inline.
    pub async fn open(
        uri: impl Into<String>,
        mode: &str,
        options: OpenOptions,
        ctx: &Context,
    ) -> EngineResult<Self> {
        options.encryption.ensure_supported()?;
        if options.attribute_filter.is_some() {
            return Err(EngineError::NotImplemented(
                "attribute filters".to_string(),
            ));
        }

        let uri = uri.into();
        let mode = OpenMode::parse(mode);
        let engine = ctx.engine().clone();

        let handle = engine
            .alloc_array(ctx, &uri)
            .map_err(|raw| resolve_raw(ctx, raw))?;

        let raw = {
            let call_ctx = ctx.clone();
            let engine = engine.clone();
            let timestamp = options.timestamp;
            tokio::task::spawn_blocking(move || {
                engine.open_array(&call_ctx, handle, mode, &Encryption::None, timestamp)
            })
            .await
        };
        let raw = match raw {
            Ok(result) => result,
            Err(e) => {
                engine.release_array(handle);
                return Err(EngineError::Engine(format!(
                    "blocking engine call failed: {e}"
                )));
            }
        };
        if let Err(raw) = raw {
            engine.release_array(handle);
            return Err(resolve_raw(ctx, raw));
        }

        match engine.array_schema(ctx, handle) {
            Ok(schema) => Ok(Self {
                uri,
                ctx: ctx.clone(),
                handle: Some(handle),
                mode,
                schema: Some(schema),
            }),
            Err(raw) => {
                let err = resolve_raw(ctx, raw);
                // Force-close under a throwaway context so the caller's
                // context keeps the schema-fetch error; the close error is
                // deliberately swallowed.
                let throwaway = Context::with_engine(engine.clone(), ctx.config().clone());
                let _ = engine.close_array(&throwaway, handle);
                engine.release_array(handle);
                Err(err)
            }
        }
    }

    /// Whether this array's engine session is currently open.
    pub fn is_open(&self) -> EngineResult<bool> {
        let handle = self.handle()?;
        self.ctx
            .engine()
            .array_is_open(&self.ctx, handle)
            .map_err(|raw| resolve_raw(&self.ctx, raw))
    }

    /// Close the engine session and invalidate the cached schema.
    ///
    /// Closing an array that is not open surfaces whatever the engine
    /// reports.
    pub fn close(&mut self) -> EngineResult<()> {
        let handle = self.handle()?;
        self.ctx
            .engine()
            .close_array(&self.ctx, handle)
            .map_err(|raw| resolve_raw(&self.ctx, raw))?;
        self.schema = None;
        Ok(())
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// The schema fetched at open time, until the array is closed.
    pub fn schema(&self) -> Option<&ArraySchema> {
        self.schema.as_ref()
    }

    /// The context this array was opened with.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    fn handle(&self) -> EngineResult<ArrayHandle> {
        self.handle
            .ok_or_else(|| EngineError::Engine("array handle already released".to_string()))
    }
}

impl Drop for Array {
    fn drop(&mut self) {
        // Release the engine handle exactly once.
        if let Some(handle) = self.handle.take() {
            self.ctx.engine().release_array(handle);
        }
    }
}
