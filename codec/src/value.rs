//! Decoded field values.

use crate::types::{BlockPosition, Color, Rotation, Vec2f, Vec3f};

/// One decoded field.
///
/// Values line up positionally with the field list that produced them. Every
/// unsigned integer codec yields [`FieldValue::UInt`] and every signed one
/// [`FieldValue::SInt`]; the codec decides the wire width.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    UInt(u64),
    SInt(i64),
    F32(f32),
    F64(f64),
    Str(String),
    /// Raw bytes, including tag payloads kept opaque.
    Bytes(Vec<u8>),
    Vec2(Vec2f),
    Vec3(Vec3f),
    BlockPos(BlockPosition),
    Rotation(Rotation),
    Color(Color),
    Array(Vec<FieldValue>),
    Struct(Vec<FieldValue>),
    Variant(VariantValue),
    /// An optional, gated or conditional field that is not on the wire.
    Absent,
}

/// The payload of a switch or union field.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantValue {
    pub discriminant: i64,
    pub fields: Vec<FieldValue>,
}

impl VariantValue {
    #[must_use]
    pub const fn new(discriminant: i64, fields: Vec<FieldValue>) -> Self {
        Self {
            discriminant,
            fields,
        }
    }
}

impl FieldValue {
    /// Short name used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::UInt(_) => "unsigned integer",
            Self::SInt(_) => "signed integer",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Str(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Vec2(_) => "vec2f",
            Self::Vec3(_) => "vec3f",
            Self::BlockPos(_) => "block position",
            Self::Rotation(_) => "rotation",
            Self::Color(_) => "color",
            Self::Array(_) => "array",
            Self::Struct(_) => "struct",
            Self::Variant(_) => "variant",
            Self::Absent => "absent",
        }
    }

    /// Returns the value as a dependency source.
    ///
    /// Unsigned values above `i64::MAX` keep their bit pattern so bitmask
    /// gates still see every bit.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Bool(value) => Some(*value as i64),
            Self::UInt(value) => Some(*value as i64),
            Self::SInt(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(values) => Some(values),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_struct(&self) -> Option<&[Self]> {
        match self {
            Self::Struct(values) => Some(values),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_variant(&self) -> Option<&VariantValue> {
        match self {
            Self::Variant(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::SInt(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        Self::F32(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<BlockPosition> for FieldValue {
    fn from(value: BlockPosition) -> Self {
        Self::BlockPos(value)
    }
}

impl From<Rotation> for FieldValue {
    fn from(value: Rotation) -> Self {
        Self::Rotation(value)
    }
}

impl From<Color> for FieldValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<Vec2f> for FieldValue {
    fn from(value: Vec2f) -> Self {
        Self::Vec2(value)
    }
}

impl From<Vec3f> for FieldValue {
    fn from(value: Vec3f) -> Self {
        Self::Vec3(value)
    }
}

impl From<VariantValue> for FieldValue {
    fn from(value: VariantValue) -> Self {
        Self::Variant(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}
