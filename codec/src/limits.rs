//! Limits for message decoding.

/// Codec-specific limits enforced while decoding message fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum element count of any array field.
    pub max_array_len: usize,
    /// Maximum byte length of any string or byte field.
    pub max_string_len: usize,
    /// Maximum nesting of structures, arrays and variants.
    pub max_depth: usize,
    /// Reject frames with bytes left after the last field.
    ///
    /// On by default, which is stricter than the reference server: it reads
    /// the fields it knows and ignores whatever follows them. Turn this off
    /// to accept the same frames it does.
    pub reject_trailing_bytes: bool,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_array_len: 32 * 1024,
            max_string_len: 4 * 1024 * 1024,
            max_depth: 16,
            reject_trailing_bytes: true,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_array_len: 64,
            max_string_len: 1024,
            max_depth: 8,
            reject_trailing_bytes: true,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    ///
    /// Trailing bytes are tolerated as well.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_array_len: usize::MAX,
            max_string_len: usize::MAX,
            max_depth: usize::MAX,
            reject_trailing_bytes: false,
        }
    }
}
