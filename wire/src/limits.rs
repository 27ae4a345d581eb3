//! Configurable limits for bounded batch decoding.

/// Wire-level limits for batch decoding.
///
/// These limits are enforced while splitting a batch into frames so a
/// hostile peer cannot make the server allocate unbounded frame lists.
/// Message body limits belong to the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum size of one (already decompressed) batch in bytes.
    pub max_batch_bytes: usize,

    /// Maximum number of frames in a single batch.
    pub max_frames: usize,

    /// Maximum length of a single frame in bytes.
    pub max_frame_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Chunk and creative-content batches run to a few megabytes.
            max_batch_bytes: 8 * 1024 * 1024,

            // Senders flush every 32 frames; leave headroom for bursts.
            max_frames: 256,
            max_frame_len: 4 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_batch_bytes: 4096,
            max_frames: 8,
            max_frame_len: 1024,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_batch_bytes: usize::MAX,
            max_frames: usize::MAX,
            max_frame_len: usize::MAX,
        }
    }
}
