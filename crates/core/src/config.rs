//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};

/// Engine tuning configuration.
///
/// Accepted and carried by a context. Application to the engine is not
/// wired up yet; the values are validated and stored so contexts created
/// with a config round-trip it faithfully.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Memory budget for engine-internal buffers, in bytes.
    #[serde(default = "default_memory_budget_bytes")]
    pub memory_budget_bytes: u64,
    /// Number of concurrent I/O operations the engine may keep in flight.
    #[serde(default = "default_io_concurrency")]
    pub io_concurrency: u32,
}

fn default_memory_budget_bytes() -> u64 {
    512 * 1024 * 1024 // 512 MiB
}

fn default_io_concurrency() -> u32 {
    8
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            memory_budget_bytes: default_memory_budget_bytes(),
            io_concurrency: default_io_concurrency(),
        }
    }
}

impl EngineConfig {
    /// Validate configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.io_concurrency == 0 {
            return Err("engine config requires io_concurrency >= 1".to_string());
        }
        Ok(())
    }
}

/// Engine backend selection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EngineBackendConfig {
    /// Local filesystem engine; array URIs are directory paths.
    #[default]
    Filesystem,
    /// In-process engine holding arrays in memory. Useful for tests and
    /// tooling; nothing survives the process.
    Memory,
}
