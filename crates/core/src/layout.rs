//! Cell and tile layout orders.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Engine enumeration code for row-major order.
pub const ROW_MAJOR: u8 = 0;
/// Engine enumeration code for column-major order.
pub const COL_MAJOR: u8 = 1;
/// Engine enumeration code for global order.
pub const GLOBAL_ORDER: u8 = 2;
/// Engine enumeration code for unordered layout.
pub const UNORDERED: u8 = 3;

/// Order in which cells or tiles are laid out within an array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    #[default]
    RowMajor,
    ColMajor,
    GlobalOrder,
    Unordered,
}

impl Layout {
    /// The engine's enumeration code for this layout.
    pub fn engine_code(&self) -> u8 {
        match self {
            Self::RowMajor => ROW_MAJOR,
            Self::ColMajor => COL_MAJOR,
            Self::GlobalOrder => GLOBAL_ORDER,
            Self::Unordered => UNORDERED,
        }
    }

    /// Decode an engine enumeration code.
    pub fn from_engine_code(code: u8) -> Result<Self> {
        match code {
            ROW_MAJOR => Ok(Self::RowMajor),
            COL_MAJOR => Ok(Self::ColMajor),
            GLOBAL_ORDER => Ok(Self::GlobalOrder),
            UNORDERED => Ok(Self::Unordered),
            other => Err(Error::UnknownLayout(other)),
        }
    }
}
