//! Game batch framing for the Bedrock wire protocol.
//!
//! This crate handles the transport boundary: the game byte that marks a
//! datagram, the compression method byte, and the varint-length-delimited
//! frames packed into one batch. It does not know about packet identifiers
//! or fields, only the structure around them.
//!
//! # Design Principles
//!
//! - **Boundary only** - Compression and the reliable transport are collaborators; this crate
//!   parses and writes the bytes around them.
//! - **Bounded decoding** - All length fields are validated against limits before iteration.
//! - **Zero-copy splitting** - Frames are returned as slices into the batch payload.

mod batch;
mod compression;
mod error;
mod limits;

pub use batch::{decode_batch, encode_batch, framed_len, join_frames, split_frames, Batch, GAME_BYTE};
pub use compression::{CompressionMethod, CompressionSettings};
pub use error::{DecodeError, EncodeError, LimitKind, WireResult};
pub use limits::Limits;
