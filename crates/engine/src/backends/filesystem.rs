//! Local filesystem engine.

use crate::context::Context;
use crate::status::{RawError, RawResult};
use crate::traits::{ArrayHandle, StorageEngine};
use bytes::Bytes;
use lattice_core::{ArraySchema, Encryption, OpenMode};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

/// Directory under the array URI holding engine metadata.
const META_DIR: &str = "__lattice";
/// Schema document file name within the metadata directory.
const SCHEMA_FILE: &str = "schema.json";

/// Engine persisting array metadata on the local filesystem.
///
/// An array URI is a directory path; the schema document lives at
/// `<uri>/__lattice/schema.json` and is written atomically via a temp file
/// and rename. Sessions are tracked in process memory, so open state does
/// not survive the process.
pub struct FilesystemEngine {
    sessions: Mutex<HashMap<ArrayHandle, Session>>,
}

struct Session {
    uri: String,
    open: bool,
    mode: Option<OpenMode>,
    schema: Option<ArraySchema>,
    opened_at: Option<OffsetDateTime>,
    timestamp: Option<u64>,
}

impl Session {
    fn unopened(uri: String) -> Self {
        Self {
            uri,
            open: false,
            mode: None,
            schema: None,
            opened_at: None,
            timestamp: None,
        }
    }
}

impl FilesystemEngine {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn meta_dir(uri: &str) -> PathBuf {
        Path::new(uri).join(META_DIR)
    }

    fn schema_path(uri: &str) -> PathBuf {
        Self::meta_dir(uri).join(SCHEMA_FILE)
    }

    fn lock_sessions(
        &self,
        ctx: &Context,
    ) -> RawResult<MutexGuard<'_, HashMap<ArrayHandle, Session>>> {
        self.sessions.lock().map_err(|_| {
            ctx.record_error("engine session table poisoned");
            RawError::Failed
        })
    }

    /// Write `data` to `path` atomically: temp file in the same directory,
    /// flushed, then renamed over the destination.
    fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
        let temp_path = path.with_file_name(format!("{SCHEMA_FILE}.tmp.{}", Uuid::new_v4()));
        {
            let mut file = std::fs::File::create(&temp_path)?;
            file.write_all(data)?;
            file.sync_all()?;
        }
        std::fs::rename(&temp_path, path)
    }

    fn encode_schema(schema: &ArraySchema) -> serde_json::Result<Bytes> {
        serde_json::to_vec_pretty(schema).map(Bytes::from)
    }

    fn read_schema(ctx: &Context, uri: &str) -> RawResult<ArraySchema> {
        let path = Self::schema_path(uri);
        let data = std::fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ctx.record_error(format!("array does not exist: {uri}"));
            } else {
                ctx.record_error(format!("failed to read schema for {uri}: {e}"));
            }
            RawError::Failed
        })?;
        serde_json::from_slice(&data).map_err(|e| {
            ctx.record_error(format!("corrupt schema document for {uri}: {e}"));
            RawError::Failed
        })
    }
}

impl Default for FilesystemEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageEngine for FilesystemEngine {
    #[instrument(skip(self, ctx, schema, encryption), fields(engine = "filesystem"))]
    fn create_array(
        &self,
        ctx: &Context,
        uri: &str,
        schema: &ArraySchema,
        encryption: &Encryption,
    ) -> RawResult<()> {
        if uri.is_empty() {
            ctx.record_error("array uri must not be empty");
            return Err(RawError::Failed);
        }
        if !encryption.is_none() {
            ctx.record_error("encryption is not supported by the filesystem engine");
            return Err(RawError::Failed);
        }

        let path = Self::schema_path(uri);
        if path.exists() {
            ctx.record_error(format!("array already exists: {uri}"));
            return Err(RawError::Failed);
        }

        let data = Self::encode_schema(schema).map_err(|e| {
            ctx.record_error(format!("failed to encode schema for {uri}: {e}"));
            RawError::Failed
        })?;

        std::fs::create_dir_all(Self::meta_dir(uri))
            .and_then(|_| Self::write_atomic(&path, &data))
            .map_err(|e| {
                ctx.record_error(format!("failed to persist schema for {uri}: {e}"));
                RawError::Failed
            })
    }

    #[instrument(skip(self, ctx), fields(engine = "filesystem"))]
    fn alloc_array(&self, ctx: &Context, uri: &str) -> RawResult<ArrayHandle> {
        if uri.is_empty() {
            ctx.record_error("array uri must not be empty");
            return Err(RawError::Failed);
        }
        let handle = ArrayHandle::new();
        self.lock_sessions(ctx)?
            .insert(handle, Session::unopened(uri.to_string()));
        Ok(handle)
    }

    #[instrument(skip(self, ctx, encryption), fields(engine = "filesystem"))]
    fn open_array(
        &self,
        ctx: &Context,
        handle: ArrayHandle,
        mode: OpenMode,
        encryption: &Encryption,
        timestamp: Option<u64>,
    ) -> RawResult<()> {
        if !encryption.is_none() {
            ctx.record_error("encryption is not supported by the filesystem engine");
            return Err(RawError::Failed);
        }

        // Look up the target first so the disk read happens without the
        // session table locked.
        let uri = {
            let sessions = self.lock_sessions(ctx)?;
            let session = sessions.get(&handle).ok_or_else(|| {
                ctx.record_error(format!("unknown array handle: {handle}"));
                RawError::Failed
            })?;
            if session.open {
                ctx.record_error(format!("array already open: {}", session.uri));
                return Err(RawError::Failed);
            }
            session.uri.clone()
        };

        let schema = Self::read_schema(ctx, &uri)?;

        let mut sessions = self.lock_sessions(ctx)?;
        let session = sessions.get_mut(&handle).ok_or_else(|| {
            ctx.record_error(format!("unknown array handle: {handle}"));
            RawError::Failed
        })?;
        session.open = true;
        session.mode = Some(mode);
        session.schema = Some(schema);
        session.opened_at = Some(OffsetDateTime::now_utc());
        // TODO: honor `timestamp` once time-travel opens are implemented.
        session.timestamp = timestamp;
        tracing::debug!(uri = %session.uri, ?mode, ?timestamp, "opened array session");
        Ok(())
    }

    fn array_schema(&self, ctx: &Context, handle: ArrayHandle) -> RawResult<ArraySchema> {
        let sessions = self.lock_sessions(ctx)?;
        let session = sessions.get(&handle).ok_or_else(|| {
            ctx.record_error(format!("unknown array handle: {handle}"));
            RawError::Failed
        })?;
        if !session.open {
            ctx.record_error(format!("array not open: {}", session.uri));
            return Err(RawError::Failed);
        }
        session.schema.clone().ok_or_else(|| {
            ctx.record_error(format!("schema missing for open array: {}", session.uri));
            RawError::Failed
        })
    }

    fn array_is_open(&self, ctx: &Context, handle: ArrayHandle) -> RawResult<bool> {
        let sessions = self.lock_sessions(ctx)?;
        match sessions.get(&handle) {
            Some(session) => Ok(session.open),
            None => {
                ctx.record_error(format!("unknown array handle: {handle}"));
                Err(RawError::Failed)
            }
        }
    }

    #[instrument(skip(self, ctx), fields(engine = "filesystem"))]
    fn close_array(&self, ctx: &Context, handle: ArrayHandle) -> RawResult<()> {
        let mut sessions = self.lock_sessions(ctx)?;
        let session = sessions.get_mut(&handle).ok_or_else(|| {
            ctx.record_error(format!("unknown array handle: {handle}"));
            RawError::Failed
        })?;
        if !session.open {
            ctx.record_error(format!("array not open: {}", session.uri));
            return Err(RawError::Failed);
        }
        tracing::debug!(
            uri = %session.uri,
            mode = ?session.mode,
            opened_at = ?session.opened_at,
            timestamp = ?session.timestamp,
            "closing array session"
        );
        session.open = false;
        session.mode = None;
        session.schema = None;
        session.opened_at = None;
        session.timestamp = None;
        Ok(())
    }

    fn release_array(&self, handle: ArrayHandle) {
        if let Ok(mut sessions) = self.sessions.lock() {
            sessions.remove(&handle);
        }
    }

    fn engine_name(&self) -> &'static str {
        "filesystem"
    }
}
