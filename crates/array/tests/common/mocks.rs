//! Scriptable engine for lifecycle failure-path tests.

use lattice_core::{ArraySchema, Encryption, OpenMode};
use lattice_engine::{ArrayHandle, Context, MemoryEngine, RawError, RawResult, StorageEngine};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Engine that delegates to a [`MemoryEngine`] but can be scripted to fail
/// specific entry points, while counting close and release calls.
pub struct ScriptedEngine {
    inner: MemoryEngine,
    pub oom_on_create: bool,
    pub fail_open: bool,
    pub fail_schema_fetch: bool,
    pub close_calls: Arc<AtomicUsize>,
    pub release_calls: Arc<AtomicUsize>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            inner: MemoryEngine::new(),
            oom_on_create: false,
            fail_open: false,
            fail_schema_fetch: false,
            close_calls: Arc::new(AtomicUsize::new(0)),
            release_calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl StorageEngine for ScriptedEngine {
    fn create_array(
        &self,
        ctx: &Context,
        uri: &str,
        schema: &ArraySchema,
        encryption: &Encryption,
    ) -> RawResult<()> {
        if self.oom_on_create {
            return Err(RawError::OutOfMemory);
        }
        self.inner.create_array(ctx, uri, schema, encryption)
    }

    fn alloc_array(&self, ctx: &Context, uri: &str) -> RawResult<ArrayHandle> {
        self.inner.alloc_array(ctx, uri)
    }

    fn open_array(
        &self,
        ctx: &Context,
        handle: ArrayHandle,
        mode: OpenMode,
        encryption: &Encryption,
        timestamp: Option<u64>,
    ) -> RawResult<()> {
        if self.fail_open {
            ctx.record_error("open refused by script");
            return Err(RawError::Failed);
        }
        self.inner.open_array(ctx, handle, mode, encryption, timestamp)
    }

    fn array_schema(&self, ctx: &Context, handle: ArrayHandle) -> RawResult<ArraySchema> {
        if self.fail_schema_fetch {
            ctx.record_error("schema fetch exploded");
            return Err(RawError::Failed);
        }
        self.inner.array_schema(ctx, handle)
    }

    fn array_is_open(&self, ctx: &Context, handle: ArrayHandle) -> RawResult<bool> {
        self.inner.array_is_open(ctx, handle)
    }

    fn close_array(&self, ctx: &Context, handle: ArrayHandle) -> RawResult<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        // Record noise on whichever context the close arrives with, so
        // tests can tell the caller's context from a throwaway one.
        ctx.record_error("close noise");
        self.inner.close_array(ctx, handle)
    }

    fn release_array(&self, handle: ArrayHandle) {
        self.release_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.release_array(handle);
    }

    fn engine_name(&self) -> &'static str {
        "scripted"
    }
}
