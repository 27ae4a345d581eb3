//! Deterministic shape hashing.
//!
//! Two peers that agree on a shape hash agree on the bytes of every message
//! of that shape. Field names are not hashed because they never reach the
//! wire; dependency references are, since they change how bytes are read.

use blake3::Hasher;

use crate::{CountPrefix, FieldCodec, FieldDef, MessageShape, Variant};
use bytestream::Endianness;

/// Computes a deterministic hash of one shape's wire layout.
#[must_use]
pub fn shape_hash(shape: &MessageShape) -> u64 {
    let mut hasher = Hasher::new();
    write_shape(&mut hasher, shape);
    finish(&hasher)
}

/// Computes a hash over a set of shapes in the given order.
#[must_use]
pub fn registry_hash<'a, I>(shapes: I) -> u64
where
    I: IntoIterator<Item = &'a MessageShape>,
{
    let mut hasher = Hasher::new();
    for shape in shapes {
        write_shape(&mut hasher, shape);
    }
    finish(&hasher)
}

fn finish(hasher: &Hasher) -> u64 {
    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}

fn write_shape(hasher: &mut Hasher, shape: &MessageShape) {
    write_u32(hasher, shape.id);
    write_fields(hasher, shape.fields);
}

#[allow(clippy::cast_possible_truncation)]
fn write_fields(hasher: &mut Hasher, fields: &[FieldDef]) {
    write_u32(hasher, fields.len() as u32);
    for field in fields {
        write_codec(hasher, &field.codec);
        match field.endian {
            None => write_u8(hasher, 0),
            Some(Endianness::Little) => write_u8(hasher, 1),
            Some(Endianness::Big) => write_u8(hasher, 2),
        }
        match field.depends_on {
            None => write_u8(hasher, 0),
            Some(name) => {
                write_u8(hasher, 1);
                write_str(hasher, name);
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn write_variants(hasher: &mut Hasher, variants: &[Variant]) {
    write_u32(hasher, variants.len() as u32);
    for variant in variants {
        write_i64(hasher, variant.discriminant);
        write_fields(hasher, variant.fields);
    }
}

fn write_codec(hasher: &mut Hasher, codec: &FieldCodec) {
    match codec {
        FieldCodec::Bool => write_u8(hasher, 0),
        FieldCodec::U8 => write_u8(hasher, 1),
        FieldCodec::I8 => write_u8(hasher, 2),
        FieldCodec::U16 => write_u8(hasher, 3),
        FieldCodec::I16 => write_u8(hasher, 4),
        FieldCodec::U32 => write_u8(hasher, 5),
        FieldCodec::I32 => write_u8(hasher, 6),
        FieldCodec::U64 => write_u8(hasher, 7),
        FieldCodec::I64 => write_u8(hasher, 8),
        FieldCodec::F32 => write_u8(hasher, 9),
        FieldCodec::F64 => write_u8(hasher, 10),
        FieldCodec::VarInt => write_u8(hasher, 11),
        FieldCodec::VarLong => write_u8(hasher, 12),
        FieldCodec::ZigZag => write_u8(hasher, 13),
        FieldCodec::ZigZong => write_u8(hasher, 14),
        FieldCodec::VarString => write_u8(hasher, 15),
        FieldCodec::String32 => write_u8(hasher, 16),
        FieldCodec::VarBytes => write_u8(hasher, 17),
        FieldCodec::Vec2f => write_u8(hasher, 18),
        FieldCodec::Vec3f => write_u8(hasher, 19),
        FieldCodec::BlockPosition => write_u8(hasher, 20),
        FieldCodec::BlockCoordinates => write_u8(hasher, 21),
        FieldCodec::Rotation => write_u8(hasher, 22),
        FieldCodec::Color => write_u8(hasher, 23),
        FieldCodec::Tag => write_u8(hasher, 24),
        FieldCodec::PrefixedTag => write_u8(hasher, 25),
        FieldCodec::Optional(inner) => {
            write_u8(hasher, 26);
            write_codec(hasher, inner);
        }
        FieldCodec::Array(element) => {
            write_u8(hasher, 27);
            write_codec(hasher, element);
        }
        FieldCodec::CountedArray { prefix, element } => {
            write_u8(hasher, 28);
            write_u8(
                hasher,
                match prefix {
                    CountPrefix::U16 => 0,
                    CountPrefix::U32 => 1,
                },
            );
            write_codec(hasher, element);
        }
        FieldCodec::Struct(fields) => {
            write_u8(hasher, 29);
            write_fields(hasher, fields);
        }
        FieldCodec::Gated { bits, inner } => {
            write_u8(hasher, 30);
            write_u64(hasher, *bits);
            write_codec(hasher, inner);
        }
        FieldCodec::When { equals, inner } => {
            write_u8(hasher, 31);
            write_i64(hasher, *equals);
            write_codec(hasher, inner);
        }
        FieldCodec::Switch(variants) => {
            write_u8(hasher, 32);
            write_variants(hasher, variants);
        }
        FieldCodec::Union { tag, variants } => {
            write_u8(hasher, 33);
            write_codec(hasher, tag);
            write_variants(hasher, variants);
        }
        FieldCodec::Unless { equals, inner } => {
            write_u8(hasher, 34);
            write_i64(hasher, *equals);
            write_codec(hasher, inner);
        }
        FieldCodec::Framed(inner) => {
            write_u8(hasher, 35);
            write_codec(hasher, inner);
        }
        FieldCodec::FixedTag => write_u8(hasher, 36),
    }
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}

fn write_u64(hasher: &mut Hasher, value: u64) {
    hasher.update(&value.to_le_bytes());
}

fn write_i64(hasher: &mut Hasher, value: i64) {
    hasher.update(&value.to_le_bytes());
}

#[allow(clippy::cast_possible_truncation)]
fn write_str(hasher: &mut Hasher, value: &str) {
    write_u32(hasher, value.len() as u32);
    hasher.update(value.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &[FieldDef] = &[
        FieldDef::new("x", FieldCodec::ZigZag),
        FieldDef::new("y", FieldCodec::VarString),
    ];
    const B: &[FieldDef] = &[
        FieldDef::new("y", FieldCodec::VarString),
        FieldDef::new("x", FieldCodec::ZigZag),
    ];
    const RENAMED: &[FieldDef] = &[
        FieldDef::new("left", FieldCodec::ZigZag),
        FieldDef::new("right", FieldCodec::VarString),
    ];
    const BIG: &[FieldDef] = &[
        FieldDef::new("x", FieldCodec::I32).big_endian(),
    ];
    const LITTLE: &[FieldDef] = &[FieldDef::new("x", FieldCodec::I32)];

    #[test]
    fn hash_is_deterministic() {
        let shape = MessageShape::new(1, "A", A);
        assert_eq!(shape_hash(&shape), shape_hash(&shape));
    }

    #[test]
    fn hash_changes_with_field_order() {
        let a = MessageShape::new(1, "A", A);
        let b = MessageShape::new(1, "A", B);
        assert_ne!(shape_hash(&a), shape_hash(&b));
    }

    #[test]
    fn hash_ignores_field_names() {
        let a = MessageShape::new(1, "A", A);
        let renamed = MessageShape::new(1, "Other", RENAMED);
        assert_eq!(shape_hash(&a), shape_hash(&renamed));
    }

    #[test]
    fn hash_changes_with_endianness() {
        let big = MessageShape::new(1, "A", BIG);
        let little = MessageShape::new(1, "A", LITTLE);
        assert_ne!(shape_hash(&big), shape_hash(&little));
    }

    #[test]
    fn hash_changes_with_id() {
        let a = MessageShape::new(1, "A", A);
        let b = MessageShape::new(2, "A", A);
        assert_ne!(shape_hash(&a), shape_hash(&b));
    }

    #[test]
    fn registry_hash_is_order_sensitive() {
        let a = MessageShape::new(1, "A", A);
        let b = MessageShape::new(2, "B", B);
        assert_ne!(registry_hash([&a, &b]), registry_hash([&b, &a]));
    }
}
