//! Byte-level reader with bounded operations.

use crate::endian::Endianness;
use crate::error::{StreamError, StreamResult};
use crate::varint::{zigzag_decode_32, zigzag_decode_64, MAX_VAR_U32_BYTES, MAX_VAR_U64_BYTES};

/// A position-tracked reader over one inbound buffer.
///
/// All read operations are bounds-checked and return errors on failure.
/// A failed read leaves the position untouched, and the reader never panics
/// on malformed input.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` positioned at the start of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current offset into the buffer.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes left to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the unread tail without consuming it.
    #[must_use]
    pub fn peek_remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Reads `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> StreamResult<&'a [u8]> {
        self.ensure(len)?;
        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    /// Consumes and returns everything left in the buffer.
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let out = &self.data[self.pos..];
        self.pos = self.data.len();
        out
    }

    /// Advances the position by `len` bytes.
    pub fn skip(&mut self, len: usize) -> StreamResult<()> {
        self.read_bytes(len).map(|_| ())
    }

    pub fn read_u8(&mut self) -> StreamResult<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    pub fn read_i8(&mut self) -> StreamResult<i8> {
        Ok(i8::from_le_bytes(self.read_array::<1>()?))
    }

    /// Reads a boolean byte; any non-zero value is `true`.
    pub fn read_bool(&mut self) -> StreamResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self, endian: Endianness) -> StreamResult<u16> {
        let bytes = self.read_array::<2>()?;
        Ok(match endian {
            Endianness::Little => u16::from_le_bytes(bytes),
            Endianness::Big => u16::from_be_bytes(bytes),
        })
    }

    pub fn read_i16(&mut self, endian: Endianness) -> StreamResult<i16> {
        let bytes = self.read_array::<2>()?;
        Ok(match endian {
            Endianness::Little => i16::from_le_bytes(bytes),
            Endianness::Big => i16::from_be_bytes(bytes),
        })
    }

    pub fn read_u32(&mut self, endian: Endianness) -> StreamResult<u32> {
        let bytes = self.read_array::<4>()?;
        Ok(match endian {
            Endianness::Little => u32::from_le_bytes(bytes),
            Endianness::Big => u32::from_be_bytes(bytes),
        })
    }

    pub fn read_i32(&mut self, endian: Endianness) -> StreamResult<i32> {
        let bytes = self.read_array::<4>()?;
        Ok(match endian {
            Endianness::Little => i32::from_le_bytes(bytes),
            Endianness::Big => i32::from_be_bytes(bytes),
        })
    }

    pub fn read_u64(&mut self, endian: Endianness) -> StreamResult<u64> {
        let bytes = self.read_array::<8>()?;
        Ok(match endian {
            Endianness::Little => u64::from_le_bytes(bytes),
            Endianness::Big => u64::from_be_bytes(bytes),
        })
    }

    pub fn read_i64(&mut self, endian: Endianness) -> StreamResult<i64> {
        let bytes = self.read_array::<8>()?;
        Ok(match endian {
            Endianness::Little => i64::from_le_bytes(bytes),
            Endianness::Big => i64::from_be_bytes(bytes),
        })
    }

    pub fn read_f32(&mut self, endian: Endianness) -> StreamResult<f32> {
        self.read_u32(endian).map(f32::from_bits)
    }

    pub fn read_f64(&mut self, endian: Endianness) -> StreamResult<f64> {
        self.read_u64(endian).map(f64::from_bits)
    }

    /// Reads an unsigned varint of at most 5 groups.
    ///
    /// Bits of the fifth group beyond the 32-bit range are dropped.
    #[allow(clippy::cast_possible_truncation)]
    pub fn read_var_u32(&mut self) -> StreamResult<u32> {
        self.read_var(MAX_VAR_U32_BYTES).map(|value| value as u32)
    }

    /// Reads an unsigned varint of at most 10 groups.
    pub fn read_var_u64(&mut self) -> StreamResult<u64> {
        self.read_var(MAX_VAR_U64_BYTES)
    }

    /// Reads a zigzag-encoded signed 32-bit varint.
    pub fn read_zigzag32(&mut self) -> StreamResult<i32> {
        self.read_var_u32().map(zigzag_decode_32)
    }

    /// Reads a zigzag-encoded signed 64-bit varint.
    pub fn read_zigzag64(&mut self) -> StreamResult<i64> {
        self.read_var_u64().map(zigzag_decode_64)
    }

    /// Reads a varint length followed by that many raw bytes.
    pub fn read_var_bytes(&mut self) -> StreamResult<&'a [u8]> {
        let start = self.pos;
        let len = self.read_var_u32()? as usize;
        self.read_bytes(len).map_err(|err| {
            self.pos = start;
            err
        })
    }

    /// Reads a varint-length-prefixed UTF-8 string.
    pub fn read_var_string(&mut self) -> StreamResult<&'a str> {
        let start = self.pos;
        let bytes = self.read_var_bytes()?;
        self.utf8(bytes, start)
    }

    /// Reads a 32-bit-length-prefixed UTF-8 string (legacy form).
    pub fn read_string32(&mut self, endian: Endianness) -> StreamResult<&'a str> {
        let start = self.pos;
        let len = self.read_u32(endian)? as usize;
        let bytes = self.read_bytes(len).map_err(|err| {
            self.pos = start;
            err
        })?;
        self.utf8(bytes, start)
    }

    fn utf8(&mut self, bytes: &'a [u8], start: usize) -> StreamResult<&'a str> {
        std::str::from_utf8(bytes).map_err(|_| {
            let offset = self.pos - bytes.len();
            self.pos = start;
            StreamError::InvalidUtf8 { offset }
        })
    }

    fn read_var(&mut self, max_bytes: usize) -> StreamResult<u64> {
        let start = self.pos;
        let mut result = 0u64;
        for group in 0..max_bytes {
            let byte = match self.read_u8() {
                Ok(byte) => byte,
                Err(err) => {
                    self.pos = start;
                    return Err(err);
                }
            };
            result |= u64::from(byte & 0x7F) << (group * 7);
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        self.pos = start;
        Err(StreamError::VarIntTooLong {
            offset: start,
            max_bytes,
        })
    }

    fn ensure(&self, len: usize) -> StreamResult<()> {
        let available = self.remaining();
        if len > available {
            return Err(StreamError::EndOfBuffer {
                offset: self.pos,
                requested: len,
                available,
            });
        }
        Ok(())
    }

    fn read_array<const N: usize>(&mut self) -> StreamResult<[u8; N]> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }
}
