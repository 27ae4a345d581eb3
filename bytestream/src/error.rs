//! Error types for byte stream operations.

use std::fmt;

/// Result type for byte stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors that can occur while reading or writing primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer {
        /// Cursor offset at which the read was attempted.
        offset: usize,
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// A variable-width integer did not terminate within its group budget.
    VarIntTooLong {
        /// Cursor offset of the first byte of the varint.
        offset: usize,
        /// Maximum number of 7-bit groups for this width.
        max_bytes: usize,
    },

    /// A string payload was not valid UTF-8.
    InvalidUtf8 {
        /// Cursor offset of the first byte of the string payload.
        offset: usize,
    },

    /// A length does not fit the prefix used to encode it.
    LengthOverflow {
        /// The offending length.
        length: usize,
    },
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOfBuffer {
                offset,
                requested,
                available,
            } => {
                write!(
                    f,
                    "attempted to read {requested} bytes at offset {offset} but only {available} bytes available"
                )
            }
            Self::VarIntTooLong { offset, max_bytes } => {
                write!(
                    f,
                    "varint at offset {offset} exceeds {max_bytes} bytes"
                )
            }
            Self::InvalidUtf8 { offset } => {
                write!(f, "invalid utf-8 string at offset {offset}")
            }
            Self::LengthOverflow { length } => {
                write!(f, "length {length} does not fit its prefix")
            }
        }
    }
}

impl std::error::Error for StreamError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_end_of_buffer() {
        let err = StreamError::EndOfBuffer {
            offset: 12,
            requested: 4,
            available: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("4 bytes"), "should mention requested bytes");
        assert!(msg.contains("1 bytes"), "should mention available bytes");
        assert!(msg.contains("offset 12"), "should mention the offset");
    }

    #[test]
    fn error_display_varint_too_long() {
        let err = StreamError::VarIntTooLong {
            offset: 3,
            max_bytes: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("offset 3"));
        assert!(msg.contains("5 bytes"));
    }

    #[test]
    fn error_display_invalid_utf8() {
        let err = StreamError::InvalidUtf8 { offset: 9 };
        assert!(err.to_string().contains("offset 9"));
    }

    #[test]
    fn error_display_length_overflow() {
        let err = StreamError::LengthOverflow { length: 70_000 };
        assert!(err.to_string().contains("70000"));
    }

    #[test]
    fn error_equality() {
        let err1 = StreamError::EndOfBuffer {
            offset: 0,
            requested: 8,
            available: 3,
        };
        let err2 = StreamError::EndOfBuffer {
            offset: 0,
            requested: 8,
            available: 3,
        };
        let err3 = StreamError::EndOfBuffer {
            offset: 1,
            requested: 8,
            available: 3,
        };
        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<StreamError>();
    }
}
