//! In-process engine.

use crate::context::Context;
use crate::status::{RawError, RawResult};
use crate::traits::{ArrayHandle, StorageEngine};
use lattice_core::{ArraySchema, Encryption, OpenMode};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use time::OffsetDateTime;
use tracing::instrument;

/// Engine holding arrays and sessions in process memory.
///
/// Same contract as the filesystem engine, with nothing surviving the
/// process. Useful for tests and tooling that should not touch disk.
pub struct MemoryEngine {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    arrays: HashMap<String, ArraySchema>,
    sessions: HashMap<ArrayHandle, Session>,
}

struct Session {
    uri: String,
    open: bool,
    mode: Option<OpenMode>,
    opened_at: Option<OffsetDateTime>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    fn lock_state(&self, ctx: &Context) -> RawResult<MutexGuard<'_, State>> {
        self.state.lock().map_err(|_| {
            ctx.record_error("engine state poisoned");
            RawError::Failed
        })
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageEngine for MemoryEngine {
    #[instrument(skip(self, ctx, schema, encryption), fields(engine = "memory"))]
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
            ctx.record_error("encryption is not supported by the memory engine");
            return Err(RawError::Failed);
        }

        let mut state = self.lock_state(ctx)?;
        if state.arrays.contains_key(uri) {
            ctx.record_error(format!("array already exists: {uri}"));
            return Err(RawError::Failed);
        }
        state.arrays.insert(uri.to_string(), schema.clone());
        Ok(())
    }

    fn alloc_array(&self, ctx: &Context, uri: &str) -> RawResult<ArrayHandle> {
        if uri.is_empty() {
            ctx.record_error("array uri must not be empty");
            return Err(RawError::Failed);
        }
        let handle = ArrayHandle::new();
        self.lock_state(ctx)?.sessions.insert(
            handle,
            Session {
                uri: uri.to_string(),
                open: false,
                mode: None,
                opened_at: None,
            },
        );
        Ok(handle)
    }

    #[instrument(skip(self, ctx, encryption), fields(engine = "memory"))]
    fn open_array(
        &self,
        ctx: &Context,
        handle: ArrayHandle,
        mode: OpenMode,
        encryption: &Encryption,
        _timestamp: Option<u64>,
    ) -> RawResult<()> {
        if !encryption.is_none() {
            ctx.record_error("encryption is not supported by the memory engine");
            return Err(RawError::Failed);
        }

        let mut state = self.lock_state(ctx)?;
        let uri = match state.sessions.get(&handle) {
            Some(session) if session.open => {
                ctx.record_error(format!("array already open: {}", session.uri));
                return Err(RawError::Failed);
            }
            Some(session) => session.uri.clone(),
            None => {
                ctx.record_error(format!("unknown array handle: {handle}"));
                return Err(RawError::Failed);
            }
        };
        if !state.arrays.contains_key(&uri) {
            ctx.record_error(format!("array does not exist: {uri}"));
            return Err(RawError::Failed);
        }

        match state.sessions.get_mut(&handle) {
            Some(session) => {
                session.open = true;
                session.mode = Some(mode);
                session.opened_at = Some(OffsetDateTime::now_utc());
                Ok(())
            }
            None => {
                ctx.record_error(format!("unknown array handle: {handle}"));
                Err(RawError::Failed)
            }
        }
    }

    fn array_schema(&self, ctx: &Context, handle: ArrayHandle) -> RawResult<ArraySchema> {
        let state = self.lock_state(ctx)?;
        let session = state.sessions.get(&handle).ok_or_else(|| {
            ctx.record_error(format!("unknown array handle: {handle}"));
            RawError::Failed
        })?;
        if !session.open {
            ctx.record_error(format!("array not open: {}", session.uri));
            return Err(RawError::Failed);
        }
        state.arrays.get(&session.uri).cloned().ok_or_else(|| {
            ctx.record_error(format!("array does not exist: {}", session.uri));
            RawError::Failed
        })
    }

    fn array_is_open(&self, ctx: &Context, handle: ArrayHandle) -> RawResult<bool> {
        let state = self.lock_state(ctx)?;
        match state.sessions.get(&handle) {
            Some(session) => Ok(session.open),
            None => {
                ctx.record_error(format!("unknown array handle: {handle}"));
                Err(RawError::Failed)
            }
        }
    }

    fn close_array(&self, ctx: &Context, handle: ArrayHandle) -> RawResult<()> {
        let mut state = self.lock_state(ctx)?;
        let session = state.sessions.get_mut(&handle).ok_or_else(|| {
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
            "closing array session"
        );
        session.open = false;
        session.mode = None;
        session.opened_at = None;
        Ok(())
    }

    fn release_array(&self, handle: ArrayHandle) {
        if let Ok(mut state) = self.state.lock() {
            state.sessions.remove(&handle);
        }
    }

    fn engine_name(&self) -> &'static str {
        "memory"
    }
}
