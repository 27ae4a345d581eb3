//! Message shape and field codec definitions for the Bedrock wire protocol.
//!
//! A [`MessageShape`] is an identifier plus an ordered list of [`FieldDef`]s.
//! Each field names a [`FieldCodec`] from a closed set, an optional byte-order
//! override and, for presence flags, bitmask gates and variant switches, the
//! earlier field whose decoded value drives it. Shapes are plain `static`
//! data: declared once, validated at registry build time and shared across
//! every decode pass without synchronization.
//!
//! # Design Principles
//!
//! - **Order is the contract** - Field lists are ordered and hashed in order.
//! - **Closed codec set** - New wire encodings are new `FieldCodec` variants, matched exhaustively.
//! - **Validate once** - Dependency references, variant sets and overrides are checked before use.

mod error;
mod field;
mod hash;
mod shape;

pub use error::{SchemaError, SchemaResult};
pub use field::{CountPrefix, FieldCodec, FieldDef, Variant};
pub use hash::{registry_hash, shape_hash};
pub use shape::{validate_fields, MessageShape};
