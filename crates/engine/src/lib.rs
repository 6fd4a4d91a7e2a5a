//! Storage-engine boundary for the Lattice array store.
//!
//! This crate provides:
//! - The narrow, status-coded [`StorageEngine`] interface
//! - [`Context`]: configuration + engine handle + last-error slot
//! - Backends: local filesystem and in-memory
//! - Resolution of raw statuses into typed engine errors

pub mod backends;
pub mod context;
pub mod error;
pub mod status;
pub mod traits;

pub use backends::filesystem::FilesystemEngine;
pub use backends::memory::MemoryEngine;
pub use context::Context;
pub use error::{resolve_raw, EngineError, EngineResult};
pub use status::{RawError, RawResult};
pub use traits::{ArrayHandle, StorageEngine};

use lattice_core::EngineBackendConfig;
use std::sync::Arc;

/// Engine build version: major.
pub const VERSION_MAJOR: u32 = 2;
/// Engine build version: minor.
pub const VERSION_MINOR: u32 = 3;
/// Engine build version: patch.
pub const VERSION_PATCH: u32 = 0;

/// The engine build version as a `(major, minor, patch)` triple.
pub fn runtime_version() -> (u32, u32, u32) {
    (VERSION_MAJOR, VERSION_MINOR, VERSION_PATCH)
}

/// Create an engine from configuration.
pub fn from_config(config: &EngineBackendConfig) -> Arc<dyn StorageEngine> {
    match config {
        EngineBackendConfig::Filesystem => Arc::new(FilesystemEngine::new()),
        EngineBackendConfig::Memory => Arc::new(MemoryEngine::new()),
    }
}
