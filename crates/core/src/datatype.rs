//! Cell datatypes.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Datatype of dimension coordinates and attribute cells.
///
/// The full vocabulary is declared so schemas can name types ahead of engine
/// support, but only [`Datatype::Int32`] is currently accepted by dimension
/// and attribute construction. Everything else fails with a not-implemented
/// error at the point the type is requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Datatype {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
}

impl Datatype {
    /// Size of one cell value in bytes.
    pub fn size_bytes(&self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }

    /// Whether this datatype is wired through to the engine.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Int32)
    }

    /// Fail with a not-implemented error unless the datatype is supported.
    pub fn ensure_supported(&self) -> Result<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(Error::NotImplemented(format!("datatype {self}")))
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_int32_is_supported() {
        assert!(Datatype::Int32.ensure_supported().is_ok());
        for dtype in [
            Datatype::Int8,
            Datatype::Int16,
            Datatype::Int64,
            Datatype::UInt8,
            Datatype::UInt16,
            Datatype::UInt32,
            Datatype::UInt64,
            Datatype::Float32,
            Datatype::Float64,
        ] {
            match dtype.ensure_supported() {
                Err(Error::NotImplemented(_)) => {}
                other => panic!("expected NotImplemented for {dtype}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_serde_names_are_lowercase() {
        let json = serde_json::to_string(&Datatype::Int32).unwrap();
        assert_eq!(json, "\"int32\"");
        let back: Datatype = serde_json::from_str("\"float64\"").unwrap();
        assert_eq!(back, Datatype::Float64);
    }
}
