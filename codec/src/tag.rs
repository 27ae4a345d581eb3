//! Collaborator seam for tag trees.
//!
//! Tag payloads are kept as opaque bytes. Finding where an inline tag ends
//! needs a grammar, which the caller provides.

use std::fmt;

/// How numbers and lengths inside a tag tree are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagFlavor {
    /// Varint lengths and zigzag varint ints; used by most packet fields.
    Network,
    /// Fixed-width little-endian numbers and 16-bit string lengths; used by
    /// item user data.
    Fixed,
}

/// Measures tag trees embedded in a frame.
pub trait TagGrammar: Send + Sync {
    /// Returns the byte length of the tag tree at the start of `input`.
    fn span(&self, input: &[u8], flavor: TagFlavor) -> Result<usize, TagError>;
}

/// A tag tree the grammar could not measure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagError {
    message: String,
}

impl TagError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TagError {}
