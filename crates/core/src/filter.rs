//! Filter pipeline descriptors.
//!
//! Filters are carried on attributes and schemas as declarative metadata.
//! Execution belongs to the storage engine and is not wired up here; the
//! descriptors are persisted with the schema so they survive a round-trip.

use serde::{Deserialize, Serialize};

/// A single filter stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Filter {
    /// Gzip compression with an explicit level.
    Gzip { level: i32 },
    /// Zstd compression with an explicit level.
    Zstd { level: i32 },
    /// LZ4 compression at the engine's default level.
    Lz4,
    /// Bit-level shuffle.
    BitShuffle,
    /// Byte-level shuffle.
    ByteShuffle,
}

/// An ordered filter pipeline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterList(Vec<Filter>);

impl FilterList {
    /// Build a pipeline from filter stages in application order.
    pub fn new(filters: Vec<Filter>) -> Self {
        Self(filters)
    }

    /// The stages in application order.
    pub fn filters(&self) -> &[Filter] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Filter>> for FilterList {
    fn from(filters: Vec<Filter>) -> Self {
        Self(filters)
    }
}
