//! Array open modes.

use std::fmt;

/// Intent of an array open session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    Write,
}

impl OpenMode {
    /// Derive the mode from a mode string.
    ///
    /// A string whose first character is `'w'` means write; any other
    /// string, including the empty string, means read.
    pub fn parse(mode: &str) -> Self {
        if mode.as_bytes().first() == Some(&b'w') {
            Self::Write
        } else {
            Self::Read
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write)
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "r"),
            Self::Write => write!(f, "w"),
        }
    }
}
