//! Error types for batch framing operations.

use std::fmt;

use bytestream::StreamError;

/// Result type for batch framing operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// Decode errors for game batch framing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Datagram is too small to contain the batch header.
    BatchTooSmall { actual: usize, required: usize },

    /// Leading byte is not the game-protocol marker.
    InvalidGameByte { found: u8 },

    /// Compression method byte is not recognised.
    UnknownCompression { method: u8 },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// A sub-frame length runs past the end of the payload.
    FrameTruncated { needed: usize, available: usize },

    /// A sub-frame length prefix could not be read.
    Stream(StreamError),
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    BatchBytes,
    FrameCount,
    FrameLength,
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    LengthOverflow { length: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BatchTooSmall { actual, required } => {
                write!(
                    f,
                    "batch too small: {actual} bytes, need at least {required}"
                )
            }
            Self::InvalidGameByte { found } => {
                write!(f, "invalid game byte: 0x{found:02X}")
            }
            Self::UnknownCompression { method } => {
                write!(f, "unknown compression method: 0x{method:02X}")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::FrameTruncated { needed, available } => {
                write!(
                    f,
                    "truncated frame: need {needed} bytes, have {available}"
                )
            }
            Self::Stream(err) => write!(f, "frame length prefix: {err}"),
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BatchBytes => "batch bytes",
            Self::FrameCount => "frame count",
            Self::FrameLength => "frame length",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthOverflow { length } => {
                write!(f, "frame length overflow: {length}")
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Stream(err) => Some(err),
            _ => None,
        }
    }
}

impl std::error::Error for EncodeError {}

impl From<StreamError> for DecodeError {
    fn from(err: StreamError) -> Self {
        Self::Stream(err)
    }
}
