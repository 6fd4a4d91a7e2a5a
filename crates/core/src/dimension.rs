//! Dimension: a single named, typed axis.

use crate::datatype::Datatype;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One axis of a multi-dimensional coordinate space.
///
/// A dimension carries an inclusive `[low, high]` coordinate range and a
/// tiling extent describing how the axis is partitioned into space tiles.
/// Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    name: String,
    domain: (i32, i32),
    tile_extent: i32,
    datatype: Datatype,
}

impl Dimension {
    /// Create a dimension over the inclusive range `[low, high]`.
    ///
    /// The name must be non-empty, the bounds ordered, the tile extent
    /// positive and no larger than the domain span. Datatypes other than
    /// int32 fail with a not-implemented error.
    pub fn new(
        name: impl Into<String>,
        domain: (i32, i32),
        tile_extent: i32,
        datatype: Datatype,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyName { kind: "dimension" });
        }
        datatype.ensure_supported()?;

        let (low, high) = domain;
        if low > high {
            return Err(Error::InvalidBounds { low, high });
        }
        if tile_extent <= 0 {
            return Err(Error::InvalidTileExtent {
                extent: tile_extent,
            });
        }
        let span = (high as i64 - low as i64 + 1) as u64;
        if tile_extent as u64 > span {
            return Err(Error::TileExtentExceedsSpan {
                extent: tile_extent,
                span,
            });
        }

        Ok(Self {
            name,
            domain,
            tile_extent,
            datatype,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inclusive `(low, high)` coordinate bounds.
    pub fn domain(&self) -> (i32, i32) {
        self.domain
    }

    pub fn tile_extent(&self) -> i32 {
        self.tile_extent
    }

    pub fn datatype(&self) -> Datatype {
        self.datatype
    }

    /// Number of coordinates on this axis.
    pub fn span(&self) -> u64 {
        (self.domain.1 as i64 - self.domain.0 as i64 + 1) as u64
    }
}
