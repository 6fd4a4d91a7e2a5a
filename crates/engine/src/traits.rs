//! The narrow storage-engine interface.

use crate::context::Context;
use crate::status::RawResult;
use lattice_core::{ArraySchema, Encryption, OpenMode};
use std::fmt;
use uuid::Uuid;

/// Opaque handle to an engine-side array session.
///
/// Exactly one wrapping object owns a handle at a time; the owner releases
/// it exactly once.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrayHandle(Uuid);

impl ArrayHandle {
    /// Mint a fresh handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ArrayHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ArrayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArrayHandle({})", self.0)
    }
}

impl fmt::Display for ArrayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Interface to the storage engine.
///
/// Calls are synchronous and may block on engine-internal I/O: the trait
/// models a native library boundary. Callers layer any non-blocking
/// behavior on top; array create and open are routed through a blocking
/// thread by the lifecycle layer, everything else runs inline.
///
/// Every entry point is status-coded. Before returning
/// [`RawError::Failed`](crate::status::RawError::Failed) an engine records
/// a human-readable message on the context it was handed.
pub trait StorageEngine: Send + Sync + 'static {
    /// Persist `schema` as a new array at `uri`. May block on I/O.
    fn create_array(
        &self,
        ctx: &Context,
        uri: &str,
        schema: &ArraySchema,
        encryption: &Encryption,
    ) -> RawResult<()>;

    /// Allocate a session handle bound to `uri`, not yet opened.
    fn alloc_array(&self, ctx: &Context, uri: &str) -> RawResult<ArrayHandle>;

    /// Open the session behind `handle` with the given intent, fetching the
    /// array's persisted state. May block on I/O.
    fn open_array(
        &self,
        ctx: &Context,
        handle: ArrayHandle,
        mode: OpenMode,
        encryption: &Encryption,
        timestamp: Option<u64>,
    ) -> RawResult<()>;

    /// Fetch the persisted schema of an open session.
    fn array_schema(&self, ctx: &Context, handle: ArrayHandle) -> RawResult<ArraySchema>;

    /// Whether the session behind `handle` is currently open.
    fn array_is_open(&self, ctx: &Context, handle: ArrayHandle) -> RawResult<bool>;

    /// Close the session behind `handle`. The handle stays allocated and
    /// may not be reopened; closing a session that is not open is reported
    /// as an engine error.
    fn close_array(&self, ctx: &Context, handle: ArrayHandle) -> RawResult<()>;

    /// Release `handle`, discarding its session state. Callers release each
    /// handle exactly once; releasing an unknown handle is a no-op.
    fn release_array(&self, handle: ArrayHandle);

    /// Static identifier for this engine, used in logs.
    fn engine_name(&self) -> &'static str;
}
