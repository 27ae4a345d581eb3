//! Compression negotiation values carried in the batch header.
//!
//! The workspace does not link a compressor. These types only describe what
//! the batch header says and which method a sender should pick; inflating
//! and deflating payloads is the transport collaborator's job.

use crate::error::DecodeError;

/// Compression method byte written after the game byte once compression
/// has been negotiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CompressionMethod {
    Zlib = 0x00,
    Snappy = 0x01,
    None = 0xFF,
}

impl CompressionMethod {
    /// Parses a method from its header byte.
    pub fn parse(raw: u8) -> Result<Self, DecodeError> {
        match raw {
            0x00 => Ok(Self::Zlib),
            0x01 => Ok(Self::Snappy),
            0xFF => Ok(Self::None),
            _ => Err(DecodeError::UnknownCompression { method: raw }),
        }
    }

    /// Returns the header byte for this method.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }
}

/// Negotiated compression parameters for one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionSettings {
    /// Payloads shorter than this many bytes are sent uncompressed.
    pub threshold: u16,
    /// Method used for payloads at or above the threshold.
    pub method: CompressionMethod,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            threshold: 256,
            method: CompressionMethod::Zlib,
        }
    }
}

impl CompressionSettings {
    /// Creates settings with an explicit threshold and method.
    #[must_use]
    pub const fn new(threshold: u16, method: CompressionMethod) -> Self {
        Self { threshold, method }
    }

    /// Selects the method for a payload of `len` bytes.
    #[must_use]
    pub const fn method_for(&self, len: usize) -> CompressionMethod {
        if len < self.threshold as usize {
            CompressionMethod::None
        } else {
            self.method
        }
    }
}
