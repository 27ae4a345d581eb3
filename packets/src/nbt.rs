//! Span measurement for tag trees.
//!
//! Packets embed tag trees in two flavors. The network flavor uses varint
//! string lengths, zigzag varint ints and longs, zigzag varint array and list
//! lengths, and little-endian shorts and floats. Item user data uses the fixed
//! flavor: every number little-endian at its natural width, `u16` string
//! lengths and `i32` array and list lengths. The codec never interprets the
//! tree; it only needs to know where it ends.

use bytestream::{ByteReader, Endianness, StreamError};
use codec::{TagError, TagFlavor, TagGrammar};

/// Nesting allowed before a tree is rejected.
pub const MAX_NBT_DEPTH: usize = 512;

const END: u8 = 0;
const BYTE: u8 = 1;
const SHORT: u8 = 2;
const INT: u8 = 3;
const LONG: u8 = 4;
const FLOAT: u8 = 5;
const DOUBLE: u8 = 6;
const BYTE_ARRAY: u8 = 7;
const STRING: u8 = 8;
const LIST: u8 = 9;
const COMPOUND: u8 = 10;
const INT_ARRAY: u8 = 11;
const LONG_ARRAY: u8 = 12;

/// [`TagGrammar`] for tag trees with a named root, in either flavor.
#[derive(Debug, Clone, Copy)]
pub struct NetworkNbt {
    max_depth: usize,
}

impl NetworkNbt {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: MAX_NBT_DEPTH,
        }
    }

    #[must_use]
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    fn skip_payload(
        &self,
        reader: &mut ByteReader<'_>,
        flavor: TagFlavor,
        kind: u8,
        depth: usize,
    ) -> Result<(), TagError> {
        if depth > self.max_depth {
            return Err(TagError::new(format!(
                "tag nesting exceeds {} levels",
                self.max_depth
            )));
        }
        match (kind, flavor) {
            (BYTE, _) => reader.skip(1).map_err(truncated)?,
            (SHORT, _) => reader.skip(2).map_err(truncated)?,
            (INT, TagFlavor::Network) => {
                reader.read_zigzag32().map_err(truncated)?;
            }
            (LONG, TagFlavor::Network) => {
                reader.read_zigzag64().map_err(truncated)?;
            }
            (INT | FLOAT, _) => reader.skip(4).map_err(truncated)?,
            (LONG | DOUBLE, _) => reader.skip(8).map_err(truncated)?,
            (BYTE_ARRAY, _) => {
                let len = read_length(reader, flavor)?;
                reader.skip(len).map_err(truncated)?;
            }
            (STRING, _) => skip_string(reader, flavor)?,
            (LIST, _) => {
                let element = reader.read_u8().map_err(truncated)?;
                let len = read_length(reader, flavor)?;
                if element == END && len > 0 {
                    return Err(TagError::new("list of end tags with non-zero length"));
                }
                for _ in 0..len {
                    self.skip_payload(reader, flavor, element, depth + 1)?;
                }
            }
            (COMPOUND, _) => loop {
                let child = reader.read_u8().map_err(truncated)?;
                if child == END {
                    break;
                }
                skip_string(reader, flavor)?;
                self.skip_payload(reader, flavor, child, depth + 1)?;
            },
            (INT_ARRAY, TagFlavor::Network) => {
                for _ in 0..read_length(reader, flavor)? {
                    reader.read_zigzag32().map_err(truncated)?;
                }
            }
            (LONG_ARRAY, TagFlavor::Network) => {
                for _ in 0..read_length(reader, flavor)? {
                    reader.read_zigzag64().map_err(truncated)?;
                }
            }
            (INT_ARRAY, TagFlavor::Fixed) => {
                let len = read_length(reader, flavor)?;
                reader.skip(scaled(len, 4)?).map_err(truncated)?;
            }
            (LONG_ARRAY, TagFlavor::Fixed) => {
                let len = read_length(reader, flavor)?;
                reader.skip(scaled(len, 8)?).map_err(truncated)?;
            }
            (other, _) => {
                return Err(TagError::new(format!("unknown tag type {other}")));
            }
        }
        Ok(())
    }
}

impl Default for NetworkNbt {
    fn default() -> Self {
        Self::new()
    }
}

impl TagGrammar for NetworkNbt {
    fn span(&self, input: &[u8], flavor: TagFlavor) -> Result<usize, TagError> {
        let mut reader = ByteReader::new(input);
        let kind = reader.read_u8().map_err(truncated)?;
        if kind != END {
            skip_string(&mut reader, flavor)?;
            self.skip_payload(&mut reader, flavor, kind, 0)?;
        }
        Ok(reader.position())
    }
}

fn skip_string(reader: &mut ByteReader<'_>, flavor: TagFlavor) -> Result<(), TagError> {
    match flavor {
        TagFlavor::Network => {
            reader.read_var_string().map_err(truncated)?;
        }
        TagFlavor::Fixed => {
            let len = reader.read_u16(Endianness::Little).map_err(truncated)?;
            reader.skip(usize::from(len)).map_err(truncated)?;
        }
    }
    Ok(())
}

fn read_length(reader: &mut ByteReader<'_>, flavor: TagFlavor) -> Result<usize, TagError> {
    let len = match flavor {
        TagFlavor::Network => reader.read_zigzag32(),
        TagFlavor::Fixed => reader.read_i32(Endianness::Little),
    }
    .map_err(truncated)?;
    usize::try_from(len).map_err(|_| TagError::new(format!("negative length {len}")))
}

fn scaled(len: usize, width: usize) -> Result<usize, TagError> {
    len.checked_mul(width)
        .ok_or_else(|| TagError::new(format!("array length {len} overflows")))
}

fn truncated(err: StreamError) -> TagError {
    TagError::new(err.to_string())
}
