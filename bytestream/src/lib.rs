//! Position-tracked byte cursor and primitive codecs for the Bedrock wire protocol.
//!
//! This crate provides [`ByteReader`] and [`ByteWriter`] for byte-level
//! encoding and decoding of the primitives every Bedrock message is built
//! from: fixed-width integers and floats in either byte order, unsigned and
//! zigzag varints, and length-prefixed strings.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked and varints have a group budget.
//! - **No domain knowledge** - This crate knows nothing about packets or fields.
//! - **Explicit errors** - All failures return structured errors carrying the offset, never panic.
//!
//! # Example
//!
//! ```
//! use bytestream::{ByteReader, ByteWriter, Endianness};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_zigzag32(-48);
//! writer.write_i32(650, Endianness::Big);
//! writer.write_var_string("steve").unwrap();
//!
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_zigzag32().unwrap(), -48);
//! assert_eq!(reader.read_i32(Endianness::Big).unwrap(), 650);
//! assert_eq!(reader.read_var_string().unwrap(), "steve");
//! ```

mod endian;
mod error;
mod reader;
pub mod varint;
mod writer;

pub use endian::Endianness;
pub use error::{StreamError, StreamResult};
pub use reader::ByteReader;
pub use writer::ByteWriter;
