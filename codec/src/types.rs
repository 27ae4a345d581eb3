//! Structured values with non-obvious wire encodings.
//!
//! Each type here reproduces an exact byte layout the protocol relies on,
//! including its lossy or asymmetric parts. Changing any of them breaks
//! compatibility with deployed peers.

use bytestream::{ByteReader, ByteWriter, Endianness, StreamResult};

use crate::error::ValueReason;

/// Two-component float vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2f {
    pub x: f32,
    pub y: f32,
}

impl Vec2f {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>, endian: Endianness) -> StreamResult<Self> {
        Ok(Self {
            x: reader.read_f32(endian)?,
            y: reader.read_f32(endian)?,
        })
    }

    pub(crate) fn write(self, writer: &mut ByteWriter, endian: Endianness) {
        writer.write_f32(self.x, endian);
        writer.write_f32(self.y, endian);
    }
}

/// Three-component float vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3f {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>, endian: Endianness) -> StreamResult<Self> {
        Ok(Self {
            x: reader.read_f32(endian)?,
            y: reader.read_f32(endian)?,
            z: reader.read_f32(endian)?,
        })
    }

    pub(crate) fn write(self, writer: &mut ByteWriter, endian: Endianness) {
        writer.write_f32(self.x, endian);
        writer.write_f32(self.y, endian);
        writer.write_f32(self.z, endian);
    }
}

/// A block location.
///
/// Under the block-position codec `x` and `z` are zigzag varints and `y` is
/// an *unsigned* varint. Negative heights are carried by adding 2^32 on
/// encode, and any raw value within 64 of 2^32 is read back as negative. A
/// height below -64 therefore encodes but decodes as a large positive number.
///
/// Under the block-coordinates codec all three axes are zigzag varints and
/// `y` must fit an `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockPosition {
    pub x: i32,
    pub y: i64,
    pub z: i32,
}

impl BlockPosition {
    /// Smallest raw `y` that decodes as a negative height.
    pub const Y_NEGATIVE_THRESHOLD: u32 = u32::MAX - 63;

    const Y_OFFSET: i64 = 1 << 32;

    #[must_use]
    pub const fn new(x: i32, y: i64, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Maps a raw unsigned `y` to a height.
    #[must_use]
    pub const fn decode_y(raw: u32) -> i64 {
        if raw >= Self::Y_NEGATIVE_THRESHOLD {
            raw as i64 - Self::Y_OFFSET
        } else {
            raw as i64
        }
    }

    /// Maps a height to its raw unsigned `y`.
    ///
    /// Returns `None` when the height does not fit 32 bits either way.
    #[must_use]
    pub fn encode_y(y: i64) -> Option<u32> {
        let raw = if y < 0 { y + Self::Y_OFFSET } else { y };
        u32::try_from(raw).ok()
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> StreamResult<Self> {
        let x = reader.read_zigzag32()?;
        let y = Self::decode_y(reader.read_var_u32()?);
        let z = reader.read_zigzag32()?;
        Ok(Self { x, y, z })
    }

    pub(crate) fn write(self, writer: &mut ByteWriter) -> Result<(), ValueReason> {
        let y = Self::encode_y(self.y).ok_or(ValueReason::SignedOutOfRange {
            codec: "block_position",
            value: self.y,
        })?;
        writer.write_zigzag32(self.x);
        writer.write_var_u32(y);
        writer.write_zigzag32(self.z);
        Ok(())
    }

    pub(crate) fn read_coordinates(reader: &mut ByteReader<'_>) -> StreamResult<Self> {
        let x = reader.read_zigzag32()?;
        let y = reader.read_zigzag32()?;
        let z = reader.read_zigzag32()?;
        Ok(Self {
            x,
            y: i64::from(y),
            z,
        })
    }

    pub(crate) fn write_coordinates(self, writer: &mut ByteWriter) -> Result<(), ValueReason> {
        let y = i32::try_from(self.y).map_err(|_| ValueReason::SignedOutOfRange {
            codec: "block_coordinates",
            value: self.y,
        })?;
        writer.write_zigzag32(self.x);
        writer.write_zigzag32(y);
        writer.write_zigzag32(self.z);
        Ok(())
    }
}

/// Yaw, pitch and head yaw in degrees, quantized to one byte each.
///
/// Encoding floors `angle / (360 / 256)` and keeps the low eight bits, so any
/// angle wraps into one turn. Decoding multiplies the unsigned byte back out,
/// which yields angles in `[0, 360)`.
///
/// On the wire the bytes are ordered pitch, head yaw, yaw.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rotation {
    pub yaw: f32,
    pub pitch: f32,
    pub head_yaw: f32,
}

impl Rotation {
    /// Degrees represented by one step of the quantized byte.
    pub const DEGREES_PER_STEP: f32 = 360.0 / 256.0;

    #[must_use]
    pub const fn new(yaw: f32, pitch: f32, head_yaw: f32) -> Self {
        Self {
            yaw,
            pitch,
            head_yaw,
        }
    }

    /// Quantizes one angle.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn angle_to_byte(angle: f32) -> u8 {
        (angle / Self::DEGREES_PER_STEP).floor() as i32 as u8
    }

    /// Expands one quantized angle.
    #[must_use]
    pub fn byte_to_angle(byte: u8) -> f32 {
        f32::from(byte) * Self::DEGREES_PER_STEP
    }

    /// Returns the angles the wire can actually carry for this rotation.
    #[must_use]
    pub fn quantized(self) -> Self {
        Self {
            yaw: Self::byte_to_angle(Self::angle_to_byte(self.yaw)),
            pitch: Self::byte_to_angle(Self::angle_to_byte(self.pitch)),
            head_yaw: Self::byte_to_angle(Self::angle_to_byte(self.head_yaw)),
        }
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> StreamResult<Self> {
        let pitch = Self::byte_to_angle(reader.read_u8()?);
        let head_yaw = Self::byte_to_angle(reader.read_u8()?);
        let yaw = Self::byte_to_angle(reader.read_u8()?);
        Ok(Self {
            yaw,
            pitch,
            head_yaw,
        })
    }

    pub(crate) fn write(self, writer: &mut ByteWriter) {
        writer.write_u8(Self::angle_to_byte(self.pitch));
        writer.write_u8(Self::angle_to_byte(self.head_yaw));
        writer.write_u8(Self::angle_to_byte(self.yaw));
    }
}

/// An ARGB color packed into one 32-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Unpacks `0xAARRGGBB`.
    #[must_use]
    pub const fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self { a, r, g, b }
    }

    /// Packs into `0xAARRGGBB`.
    #[must_use]
    pub const fn to_argb(self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>, endian: Endianness) -> StreamResult<Self> {
        Ok(Self::from_argb(reader.read_u32(endian)?))
    }

    pub(crate) fn write(self, writer: &mut ByteWriter, endian: Endianness) {
        writer.write_u32(self.to_argb(), endian);
    }
}
