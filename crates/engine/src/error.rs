//! Engine error types and status resolution.

use crate::context::Context;
use crate::status::RawError;
use thiserror::Error;

/// Engine boundary error type.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine out of memory")]
    OutOfMemory,

    #[error("engine error: {0}")]
    Engine(String),

    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Failure encountered while retrieving the details of another error.
    /// Distinct from the error it was trying to describe.
    #[error("error retrieving engine error: {0}")]
    ErrorReporting(String),
}

/// Result type alias for engine boundary operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;

impl From<lattice_core::Error> for EngineError {
    fn from(err: lattice_core::Error) -> Self {
        match err {
            lattice_core::Error::NotImplemented(what) => Self::NotImplemented(what),
            other => Self::Engine(other.to_string()),
        }
    }
}

/// Resolve a raw engine status into a full error by consulting the
/// context's last-error slot.
///
/// A failure during retrieval itself surfaces as the distinct
/// [`EngineError::ErrorReporting`] meta-error rather than the error the
/// caller was asking about.
pub fn resolve_raw(ctx: &Context, raw: RawError) -> EngineError {
    match raw {
        RawError::OutOfMemory => EngineError::OutOfMemory,
        RawError::Failed => match ctx.last_error() {
            Ok(Some(message)) => EngineError::Engine(message),
            Ok(None) => EngineError::Engine("unknown engine error".to_string()),
            Err(meta) => meta,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::EngineConfig;

    #[test]
    fn test_oom_resolves_without_consulting_context() {
        let ctx = Context::new(EngineConfig::default()).unwrap();
        ctx.record_error("stale message");
        assert!(matches!(
            resolve_raw(&ctx, RawError::OutOfMemory),
            EngineError::OutOfMemory
        ));
    }

    #[test]
    fn test_failed_resolves_to_recorded_message() {
        let ctx = Context::new(EngineConfig::default()).unwrap();
        ctx.record_error("array does not exist: tmp/missing");
        match resolve_raw(&ctx, RawError::Failed) {
            EngineError::Engine(message) => {
                assert_eq!(message, "array does not exist: tmp/missing")
            }
            other => panic!("expected Engine, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_without_message_is_still_an_engine_error() {
        let ctx = Context::new(EngineConfig::default()).unwrap();
        match resolve_raw(&ctx, RawError::Failed) {
            EngineError::Engine(message) => assert_eq!(message, "unknown engine error"),
            other => panic!("expected Engine, got {other:?}"),
        }
    }
}
