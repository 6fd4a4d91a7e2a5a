//! Encryption descriptors for array create and open.

use crate::error::{Error, Result};
use std::fmt;

/// Encryption requested for an array.
///
/// Only [`Encryption::None`] is wired through to the engine; presenting a
/// key fails with a not-implemented error before any engine call is made.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Encryption {
    /// No encryption.
    #[default]
    None,
    /// AES-256-GCM with a caller-supplied key.
    Aes256Gcm { key: Vec<u8> },
}

impl Encryption {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Fail with a not-implemented error unless no encryption is requested.
    pub fn ensure_supported(&self) -> Result<()> {
        match self {
            Self::None => Ok(()),
            Self::Aes256Gcm { .. } => {
                Err(Error::NotImplemented("encrypted arrays".to_string()))
            }
        }
    }
}

impl fmt::Debug for Encryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "Encryption::None"),
            Self::Aes256Gcm { .. } => f
                .debug_struct("Encryption::Aes256Gcm")
                .field("key", &"<redacted>")
                .finish(),
        }
    }
}
