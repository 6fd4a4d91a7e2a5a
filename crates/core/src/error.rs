//! Error types for the schema model.

use thiserror::Error;

/// Schema model error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },

    #[error("invalid domain bounds: low {low} exceeds high {high}")]
    InvalidBounds { low: i32, high: i32 },

    #[error("invalid tile extent {extent}: must be positive")]
    InvalidTileExtent { extent: i32 },

    #[error("tile extent {extent} exceeds domain span {span}")]
    TileExtentExceedsSpan { extent: i32, span: u64 },

    #[error("duplicate dimension name: {0}")]
    DuplicateDimension(String),

    #[error("duplicate attribute name: {0}")]
    DuplicateAttribute(String),

    #[error("unknown layout code: {0}")]
    UnknownLayout(u8),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not implemented: {0}")]
    NotImplemented(String),
}

/// Result type alias for schema model operations.
pub type Result<T> = std::result::Result<T, Error>;
