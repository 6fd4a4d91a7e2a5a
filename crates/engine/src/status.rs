//! Status codes returned by engine entry points.

/// Non-OK status classes of the engine interface.
///
/// A [`RawError::Failed`] status means the engine recorded a message in the
/// context's last-error slot before returning; callers resolve it into a
/// full error through [`resolve_raw`](crate::error::resolve_raw). Out of
/// memory is reported as its own class and carries no message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawError {
    /// The call failed; consult the context's last error for details.
    Failed,
    /// The engine allocator reported exhaustion.
    OutOfMemory,
}

/// Result type of every [`StorageEngine`](crate::traits::StorageEngine)
/// entry point.
pub type RawResult<T> = std::result::Result<T, RawError>;
