//! Byte-level writer backed by a growable buffer.

use crate::endian::Endianness;
use crate::error::{StreamError, StreamResult};
use crate::varint::{zigzag_encode_32, zigzag_encode_64};

/// A writer for encoding primitives into an owned `Vec<u8>`.
///
/// Writes never fail for lack of space; only length prefixes that cannot
/// represent their payload return an error.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Creates an empty writer.
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates an empty writer with reserved capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the writer and returns the encoded bytes.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    pub fn write_u16(&mut self, value: u16, endian: Endianness) {
        match endian {
            Endianness::Little => self.buf.extend_from_slice(&value.to_le_bytes()),
            Endianness::Big => self.buf.extend_from_slice(&value.to_be_bytes()),
        }
    }

    pub fn write_i16(&mut self, value: i16, endian: Endianness) {
        match endian {
            Endianness::Little => self.buf.extend_from_slice(&value.to_le_bytes()),
            Endianness::Big => self.buf.extend_from_slice(&value.to_be_bytes()),
        }
    }

    pub fn write_u32(&mut self, value: u32, endian: Endianness) {
        match endian {
            Endianness::Little => self.buf.extend_from_slice(&value.to_le_bytes()),
            Endianness::Big => self.buf.extend_from_slice(&value.to_be_bytes()),
        }
    }

    pub fn write_i32(&mut self, value: i32, endian: Endianness) {
        match endian {
            Endianness::Little => self.buf.extend_from_slice(&value.to_le_bytes()),
            Endianness::Big => self.buf.extend_from_slice(&value.to_be_bytes()),
        }
    }

    pub fn write_u64(&mut self, value: u64, endian: Endianness) {
        match endian {
            Endianness::Little => self.buf.extend_from_slice(&value.to_le_bytes()),
            Endianness::Big => self.buf.extend_from_slice(&value.to_be_bytes()),
        }
    }

    pub fn write_i64(&mut self, value: i64, endian: Endianness) {
        match endian {
            Endianness::Little => self.buf.extend_from_slice(&value.to_le_bytes()),
            Endianness::Big => self.buf.extend_from_slice(&value.to_be_bytes()),
        }
    }

    pub fn write_f32(&mut self, value: f32, endian: Endianness) {
        self.write_u32(value.to_bits(), endian);
    }

    pub fn write_f64(&mut self, value: f64, endian: Endianness) {
        self.write_u64(value.to_bits(), endian);
    }

    /// Writes an unsigned varint (at most 5 bytes).
    pub fn write_var_u32(&mut self, value: u32) {
        self.write_var_u64(u64::from(value));
    }

    /// Writes an unsigned varint (at most 10 bytes).
    #[allow(clippy::cast_possible_truncation)]
    pub fn write_var_u64(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.buf.push((value as u8 & 0x7F) | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
    }

    /// Writes a zigzag-encoded signed 32-bit varint.
    pub fn write_zigzag32(&mut self, value: i32) {
        self.write_var_u32(zigzag_encode_32(value));
    }

    /// Writes a zigzag-encoded signed 64-bit varint.
    pub fn write_zigzag64(&mut self, value: i64) {
        self.write_var_u64(zigzag_encode_64(value));
    }

    /// Writes a varint length followed by the raw bytes.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) -> StreamResult<()> {
        let len = u32::try_from(bytes.len())
            .map_err(|_| StreamError::LengthOverflow { length: bytes.len() })?;
        self.write_var_u32(len);
        self.write_bytes(bytes);
        Ok(())
    }

    /// Writes a varint-length-prefixed UTF-8 string.
    pub fn write_var_string(&mut self, value: &str) -> StreamResult<()> {
        self.write_var_bytes(value.as_bytes())
    }

    /// Writes a 32-bit-length-prefixed UTF-8 string (legacy form).
    pub fn write_string32(&mut self, value: &str, endian: Endianness) -> StreamResult<()> {
        let len = u32::try_from(value.len())
            .map_err(|_| StreamError::LengthOverflow { length: value.len() })?;
        self.write_u32(len, endian);
        self.write_bytes(value.as_bytes());
        Ok(())
    }
}
