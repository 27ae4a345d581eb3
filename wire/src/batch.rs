//! Game batch decoding and frame splitting.
//!
//! A game datagram is laid out as:
//!
//! ```text
//! 0xFE [method byte, once compression is negotiated] payload
//! payload = (varint length, frame bytes)*
//! ```

use bytestream::{varint, ByteReader, ByteWriter};

use crate::compression::CompressionMethod;
use crate::error::{DecodeError, EncodeError, LimitKind, WireResult};
use crate::limits::Limits;

/// Marker byte that opens every game-protocol datagram.
pub const GAME_BYTE: u8 = 0xFE;

/// A game batch with its header parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch<'a> {
    /// Method announced by the header, `None` before negotiation.
    pub method: Option<CompressionMethod>,
    /// Payload following the header, still compressed if `method` says so.
    pub payload: &'a [u8],
}

impl Batch<'_> {
    /// Returns `true` if the payload must be inflated before splitting.
    #[must_use]
    pub const fn is_compressed(&self) -> bool {
        matches!(
            self.method,
            Some(CompressionMethod::Zlib | CompressionMethod::Snappy)
        )
    }
}

/// Parses the batch header.
///
/// `compression_enabled` tells whether the connection has negotiated
/// compression, in which case a method byte follows the game byte.
pub fn decode_batch<'a>(
    buf: &'a [u8],
    compression_enabled: bool,
    limits: &Limits,
) -> WireResult<Batch<'a>> {
    let required = if compression_enabled { 2 } else { 1 };
    if buf.len() < required {
        return Err(DecodeError::BatchTooSmall {
            actual: buf.len(),
            required,
        });
    }
    if buf.len() > limits.max_batch_bytes {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::BatchBytes,
            limit: limits.max_batch_bytes,
            actual: buf.len(),
        });
    }
    if buf[0] != GAME_BYTE {
        return Err(DecodeError::InvalidGameByte { found: buf[0] });
    }

    if compression_enabled {
        let method = CompressionMethod::parse(buf[1])?;
        Ok(Batch {
            method: Some(method),
            payload: &buf[2..],
        })
    } else {
        Ok(Batch {
            method: None,
            payload: &buf[1..],
        })
    }
}

/// Writes a batch header followed by `payload`.
#[must_use]
pub fn encode_batch(method: Option<CompressionMethod>, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 2);
    out.push(GAME_BYTE);
    if let Some(method) = method {
        out.push(method.raw());
    }
    out.extend_from_slice(payload);
    out
}

/// Splits a decompressed payload into its length-delimited frames.
pub fn split_frames<'a>(payload: &'a [u8], limits: &Limits) -> WireResult<Vec<&'a [u8]>> {
    let mut reader = ByteReader::new(payload);
    let mut frames = Vec::new();

    while !reader.is_empty() {
        if frames.len() >= limits.max_frames {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::FrameCount,
                limit: limits.max_frames,
                actual: frames.len() + 1,
            });
        }

        let len = reader.read_var_u32()? as usize;
        if len > limits.max_frame_len {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::FrameLength,
                limit: limits.max_frame_len,
                actual: len,
            });
        }
        if len > reader.remaining() {
            return Err(DecodeError::FrameTruncated {
                needed: reader.position() + len,
                available: payload.len(),
            });
        }

        frames.push(reader.read_bytes(len)?);
    }

    Ok(frames)
}

/// Concatenates frames into a payload, each prefixed with its varint length.
pub fn join_frames<I, F>(frames: I) -> Result<Vec<u8>, EncodeError>
where
    I: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let mut writer = ByteWriter::new();
    for frame in frames {
        let frame = frame.as_ref();
        let len = u32::try_from(frame.len())
            .map_err(|_| EncodeError::LengthOverflow { length: frame.len() })?;
        writer.write_var_u32(len);
        writer.write_bytes(frame);
    }
    Ok(writer.finish())
}

/// Encoded size of one frame including its length prefix.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn framed_len(frame_len: usize) -> usize {
    varint::var_u64_len(frame_len as u64) + frame_len
}
