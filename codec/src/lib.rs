//! Schema-driven message encoding and decoding for the Bedrock wire protocol.
//!
//! This is the main codec crate that ties together bytestream and schema: a
//! [`Registry`] maps packet identifiers to static shapes, and a [`Codec`]
//! walks those shapes to turn frames into [`Message`]s and back.
//!
//! # Features
//!
//! - Varint identifier envelope with bidirectional registry lookups
//! - Presence flags, bitmask gates and equality gates driven by earlier fields
//! - Switches on earlier fields and unions with inline discriminants
//! - Block positions, rotations and colors with their exact wire quirks
//! - Unknown packets reported as recoverable so a batch keeps flowing
//!
//! # Design Principles
//!
//! - **Declarative shapes** - Every packet is data; there is no per-packet code.
//! - **Symmetric** - Encode and decode walk the same declarations in the same order.
//! - **Bounded decoding** - Counts, lengths and nesting are checked against limits.
//! - **Byte-exact** - Lossy encodings are reproduced, not corrected.

mod envelope;
mod error;
mod fields;
mod limits;
mod message;
mod registry;
mod scope;
mod tag;
mod types;
mod value;

pub use envelope::{Codec, DecodedFrames};
pub use error::{CodecError, CodecResult, LimitKind, RegistryError, ValueReason};
pub use limits::CodecLimits;
pub use message::Message;
pub use registry::{Registry, RegistryBuilder};
pub use tag::{TagError, TagFlavor, TagGrammar};
pub use types::{BlockPosition, Color, Rotation, Vec2f, Vec3f};
pub use value::{FieldValue, VariantValue};
