//! Field codec and field descriptor definitions.

use bytestream::Endianness;

/// Width of the count prefix of a legacy array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountPrefix {
    /// 16-bit count, byte order from the field.
    U16,
    /// 32-bit count, byte order from the field.
    U32,
}

/// The encoding for a field.
///
/// The set is closed: every codec the protocol uses is a variant here and the
/// codec crate matches on it exhaustively. Composite variants point at other
/// `'static` definitions so whole message shapes can live in `static` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCodec {
    /// One byte, non-zero is `true`.
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,

    /// Unsigned 32-bit varint.
    VarInt,

    /// Unsigned 64-bit varint.
    VarLong,

    /// Zigzag signed 32-bit varint.
    ZigZag,

    /// Zigzag signed 64-bit varint.
    ZigZong,

    /// Varint byte length followed by UTF-8.
    VarString,

    /// 32-bit byte length followed by UTF-8 (legacy fields only).
    String32,

    /// Varint byte length followed by raw bytes.
    VarBytes,

    /// Two `f32` values.
    Vec2f,

    /// Three `f32` values.
    Vec3f,

    /// Zigzag x and z around an unsigned varint y.
    BlockPosition,

    /// Zigzag x, y and z.
    BlockCoordinates,

    /// Yaw, pitch and head yaw, one byte each.
    Rotation,

    /// ARGB packed into a 32-bit integer.
    Color,

    /// Tag tree read in place; needs a grammar to find its end.
    Tag,

    /// Tag tree behind a varint byte length; skippable without a grammar.
    PrefixedTag,

    /// Tag tree with fixed-width little-endian numbers and 16-bit string
    /// lengths, as stored in item user data; needs a grammar.
    FixedTag,

    /// Presence boolean followed by the inner codec when `true`.
    Optional(&'static FieldCodec),

    /// Varint count followed by that many elements.
    Array(&'static FieldCodec),

    /// Fixed-width count followed by that many elements.
    CountedArray {
        prefix: CountPrefix,
        element: &'static FieldCodec,
    },

    /// Nested ordered fields with their own dependency scope.
    Struct(&'static [FieldDef]),

    /// Present when the dependency value has all of `bits` set.
    Gated {
        bits: u64,
        inner: &'static FieldCodec,
    },

    /// Present when the dependency value equals `equals`.
    When {
        equals: i64,
        inner: &'static FieldCodec,
    },

    /// Present when the dependency value differs from `equals`.
    Unless {
        equals: i64,
        inner: &'static FieldCodec,
    },

    /// Varint byte length, then the inner value filling exactly that many
    /// bytes. A zero length means absent.
    Framed(&'static FieldCodec),

    /// Payload selected by the dependency value.
    Switch(&'static [Variant]),

    /// Discriminant written inline by `tag`, then the selected payload.
    Union {
        tag: &'static FieldCodec,
        variants: &'static [Variant],
    },
}

impl FieldCodec {
    /// Creates an optional codec.
    #[must_use]
    pub const fn optional(inner: &'static Self) -> Self {
        Self::Optional(inner)
    }

    /// Creates a varint-counted array codec.
    #[must_use]
    pub const fn array(element: &'static Self) -> Self {
        Self::Array(element)
    }

    /// Creates a fixed-width-counted array codec.
    #[must_use]
    pub const fn counted_array(prefix: CountPrefix, element: &'static Self) -> Self {
        Self::CountedArray { prefix, element }
    }

    /// Creates a bitmask-gated codec.
    #[must_use]
    pub const fn gated(bits: u64, inner: &'static Self) -> Self {
        Self::Gated { bits, inner }
    }

    /// Creates an equality-gated codec.
    #[must_use]
    pub const fn when(equals: i64, inner: &'static Self) -> Self {
        Self::When { equals, inner }
    }

    /// Creates an inequality-gated codec.
    #[must_use]
    pub const fn unless(equals: i64, inner: &'static Self) -> Self {
        Self::Unless { equals, inner }
    }

    /// Creates a length-framed codec.
    #[must_use]
    pub const fn framed(inner: &'static Self) -> Self {
        Self::Framed(inner)
    }

    /// Short name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::I8 => "i8",
            Self::U16 => "u16",
            Self::I16 => "i16",
            Self::U32 => "u32",
            Self::I32 => "i32",
            Self::U64 => "u64",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::VarInt => "varint",
            Self::VarLong => "varlong",
            Self::ZigZag => "zigzag",
            Self::ZigZong => "zigzong",
            Self::VarString => "varstring",
            Self::String32 => "string32",
            Self::VarBytes => "varbytes",
            Self::Vec2f => "vec2f",
            Self::Vec3f => "vec3f",
            Self::BlockPosition => "block_position",
            Self::BlockCoordinates => "block_coordinates",
            Self::Rotation => "rotation",
            Self::Color => "color",
            Self::Tag => "tag",
            Self::PrefixedTag => "prefixed_tag",
            Self::FixedTag => "fixed_tag",
            Self::Optional(_) => "optional",
            Self::Array(_) => "array",
            Self::CountedArray { .. } => "counted_array",
            Self::Struct(_) => "struct",
            Self::Gated { .. } => "gated",
            Self::When { .. } => "when",
            Self::Unless { .. } => "unless",
            Self::Framed(_) => "framed",
            Self::Switch(_) => "switch",
            Self::Union { .. } => "union",
        }
    }

    /// Returns `true` if values of this codec can drive a dependent field.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Bool
                | Self::U8
                | Self::I8
                | Self::U16
                | Self::I16
                | Self::U32
                | Self::I32
                | Self::U64
                | Self::I64
                | Self::VarInt
                | Self::VarLong
                | Self::ZigZag
                | Self::ZigZong
        )
    }

    /// Returns `true` if this codec reads the field's dependency value.
    ///
    /// Wrappers that do not open a new scope pass the dependency through to
    /// their inner codec.
    #[must_use]
    pub const fn needs_dependency(&self) -> bool {
        match self {
            Self::Gated { .. } | Self::When { .. } | Self::Unless { .. } | Self::Switch(_) => true,
            Self::Optional(inner) | Self::Array(inner) | Self::Framed(inner) => {
                inner.needs_dependency()
            }
            Self::CountedArray { element, .. } => element.needs_dependency(),
            _ => false,
        }
    }

    /// Returns `true` if a byte-order override changes this codec's bytes.
    #[must_use]
    pub const fn supports_endian(&self) -> bool {
        match self {
            Self::U16
            | Self::I16
            | Self::U32
            | Self::I32
            | Self::U64
            | Self::I64
            | Self::F32
            | Self::F64
            | Self::String32
            | Self::Vec2f
            | Self::Vec3f
            | Self::Color
            | Self::CountedArray { .. } => true,
            Self::Optional(inner)
            | Self::Array(inner)
            | Self::Framed(inner)
            | Self::Gated { inner, .. }
            | Self::When { inner, .. }
            | Self::Unless { inner, .. } => inner.supports_endian(),
            _ => false,
        }
    }
}

/// One payload shape of a switch or union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    pub discriminant: i64,
    pub name: &'static str,
    pub fields: &'static [FieldDef],
}

impl Variant {
    #[must_use]
    pub const fn new(discriminant: i64, name: &'static str, fields: &'static [FieldDef]) -> Self {
        Self {
            discriminant,
            name,
            fields,
        }
    }
}

/// Field definition within a message shape or nested structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub codec: FieldCodec,
    /// Byte-order override; `None` means little-endian.
    pub endian: Option<Endianness>,
    /// Earlier field whose value this field's codec consumes.
    pub depends_on: Option<&'static str>,
}

impl FieldDef {
    /// Creates a little-endian field without a dependency.
    #[must_use]
    pub const fn new(name: &'static str, codec: FieldCodec) -> Self {
        Self {
            name,
            codec,
            endian: None,
            depends_on: None,
        }
    }

    /// Sets the byte order for the field.
    #[must_use]
    pub const fn endian(mut self, endian: Endianness) -> Self {
        self.endian = Some(endian);
        self
    }

    /// Shorthand for a big-endian override.
    #[must_use]
    pub const fn big_endian(self) -> Self {
        self.endian(Endianness::Big)
    }

    /// Names the earlier field whose value drives this one.
    #[must_use]
    pub const fn depends_on(mut self, field: &'static str) -> Self {
        self.depends_on = Some(field);
        self
    }

    /// Byte order to apply, defaulting to little-endian.
    #[must_use]
    pub fn byte_order(&self) -> Endianness {
        self.endian.unwrap_or_default()
    }
}
