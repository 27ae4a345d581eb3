//! One pass over a field list, in either direction.
//!
//! Decoding and encoding walk the same declarations in the same order. Each
//! integer-valued field is recorded in the current [`Scope`] as soon as it is
//! processed, so later fields can resolve their `depends_on` without anything
//! being stored on the message itself.

use bytestream::{ByteReader, ByteWriter, StreamError};
use schema::{CountPrefix, FieldCodec, FieldDef, Variant};

use crate::error::{CodecError, CodecResult, LimitKind, ValueReason};
use crate::limits::CodecLimits;
use crate::scope::Scope;
use crate::tag::{TagError, TagFlavor, TagGrammar};
use crate::types::{BlockPosition, Color, Rotation, Vec2f, Vec3f};
use crate::value::{FieldValue, VariantValue};

/// Settings shared by every field of one message.
#[derive(Clone, Copy)]
pub(crate) struct FieldContext<'c> {
    pub(crate) limits: &'c CodecLimits,
    pub(crate) grammar: Option<&'c dyn TagGrammar>,
}

/// The field a codec belongs to, plus its resolved dependency value.
#[derive(Clone, Copy)]
struct Site {
    field: &'static FieldDef,
    dependency: Option<i64>,
}

impl Site {
    fn resolve(field: &'static FieldDef, scope: &Scope<'_>) -> CodecResult<Self> {
        let dependency = match field.depends_on {
            Some(depends_on) => Some(scope.lookup(depends_on).ok_or(
                CodecError::MissingDependency {
                    field: field.name,
                    depends_on,
                },
            )?),
            None => None,
        };
        Ok(Self { field, dependency })
    }

    fn required(self) -> CodecResult<i64> {
        self.dependency.ok_or(CodecError::MissingDependency {
            field: self.field.name,
            depends_on: self.field.depends_on.unwrap_or_default(),
        })
    }

    const fn invalid(self, reason: ValueReason) -> CodecError {
        CodecError::InvalidValue {
            field: self.field.name,
            reason,
        }
    }
}

/// Decodes `fields` in order from `reader`.
pub(crate) fn decode_fields(
    fields: &'static [FieldDef],
    reader: &mut ByteReader<'_>,
    ctx: FieldContext<'_>,
    parent: Option<&Scope<'_>>,
    depth: usize,
) -> CodecResult<Vec<FieldValue>> {
    if depth > ctx.limits.max_depth {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::Depth,
            limit: ctx.limits.max_depth,
            actual: depth,
        });
    }

    let mut scope = Scope::new(parent);
    let mut values = Vec::with_capacity(fields.len());
    for field in fields {
        let site = Site::resolve(field, &scope)?;
        let value = read_value(&field.codec, site, reader, ctx, &scope, depth)?;
        record(&mut scope, field, &value);
        values.push(value);
    }
    Ok(values)
}

/// Encodes `values` against `fields`, which must line up one to one.
pub(crate) fn encode_fields(
    fields: &'static [FieldDef],
    values: &[FieldValue],
    scope_name: &'static str,
    writer: &mut ByteWriter,
    ctx: FieldContext<'_>,
    parent: Option<&Scope<'_>>,
) -> CodecResult<()> {
    if values.len() != fields.len() {
        return Err(CodecError::FieldCountMismatch {
            scope: scope_name,
            expected: fields.len(),
            actual: values.len(),
        });
    }

    let mut scope = Scope::new(parent);
    for (field, value) in fields.iter().zip(values) {
        let site = Site::resolve(field, &scope)?;
        write_value(&field.codec, value, site, writer, ctx, &scope)?;
        record(&mut scope, field, value);
    }
    Ok(())
}

fn record(scope: &mut Scope<'_>, field: &'static FieldDef, value: &FieldValue) {
    if field.codec.is_integer() {
        if let Some(raw) = value.as_i64() {
            scope.record(field.name, raw);
        }
    }
}

fn read_value(
    codec: &'static FieldCodec,
    site: Site,
    reader: &mut ByteReader<'_>,
    ctx: FieldContext<'_>,
    scope: &Scope<'_>,
    depth: usize,
) -> CodecResult<FieldValue> {
    let endian = site.field.byte_order();
    let value = match codec {
        FieldCodec::Bool => FieldValue::Bool(reader.read_bool()?),
        FieldCodec::U8 => FieldValue::UInt(u64::from(reader.read_u8()?)),
        FieldCodec::I8 => FieldValue::SInt(i64::from(reader.read_i8()?)),
        FieldCodec::U16 => FieldValue::UInt(u64::from(reader.read_u16(endian)?)),
        FieldCodec::I16 => FieldValue::SInt(i64::from(reader.read_i16(endian)?)),
        FieldCodec::U32 => FieldValue::UInt(u64::from(reader.read_u32(endian)?)),
        FieldCodec::I32 => FieldValue::SInt(i64::from(reader.read_i32(endian)?)),
        FieldCodec::U64 => FieldValue::UInt(reader.read_u64(endian)?),
        FieldCodec::I64 => FieldValue::SInt(reader.read_i64(endian)?),
        FieldCodec::F32 => FieldValue::F32(reader.read_f32(endian)?),
        FieldCodec::F64 => FieldValue::F64(reader.read_f64(endian)?),
        FieldCodec::VarInt => FieldValue::UInt(u64::from(reader.read_var_u32()?)),
        FieldCodec::VarLong => FieldValue::UInt(reader.read_var_u64()?),
        FieldCodec::ZigZag => FieldValue::SInt(i64::from(reader.read_zigzag32()?)),
        FieldCodec::ZigZong => FieldValue::SInt(reader.read_zigzag64()?),
        FieldCodec::VarString => {
            let text = reader.read_var_string()?;
            check_length(ctx, text.len())?;
            FieldValue::Str(text.to_owned())
        }
        FieldCodec::String32 => {
            let text = reader.read_string32(endian)?;
            check_length(ctx, text.len())?;
            FieldValue::Str(text.to_owned())
        }
        FieldCodec::VarBytes => {
            let bytes = reader.read_var_bytes()?;
            check_length(ctx, bytes.len())?;
            FieldValue::Bytes(bytes.to_vec())
        }
        FieldCodec::Vec2f => FieldValue::Vec2(Vec2f::read(reader, endian)?),
        FieldCodec::Vec3f => FieldValue::Vec3(Vec3f::read(reader, endian)?),
        FieldCodec::BlockPosition => FieldValue::BlockPos(BlockPosition::read(reader)?),
        FieldCodec::BlockCoordinates => {
            FieldValue::BlockPos(BlockPosition::read_coordinates(reader)?)
        }
        FieldCodec::Rotation => FieldValue::Rotation(Rotation::read(reader)?),
        FieldCodec::Color => FieldValue::Color(Color::read(reader, endian)?),
        FieldCodec::Tag => {
            FieldValue::Bytes(read_inline_tag(site, reader, ctx, TagFlavor::Network)?)
        }
        FieldCodec::FixedTag => {
            FieldValue::Bytes(read_inline_tag(site, reader, ctx, TagFlavor::Fixed)?)
        }
        FieldCodec::PrefixedTag => FieldValue::Bytes(read_prefixed_tag(site, reader, ctx)?),
        FieldCodec::Optional(inner) => {
            if reader.read_bool()? {
                read_value(inner, site, reader, ctx, scope, depth)?
            } else {
                FieldValue::Absent
            }
        }
        FieldCodec::Array(element) => {
            let count = widen(reader.read_var_u32()?);
            read_elements(element, count, site, reader, ctx, scope, depth)?
        }
        FieldCodec::CountedArray { prefix, element } => {
            let count = match prefix {
                CountPrefix::U16 => usize::from(reader.read_u16(endian)?),
                CountPrefix::U32 => widen(reader.read_u32(endian)?),
            };
            read_elements(element, count, site, reader, ctx, scope, depth)?
        }
        FieldCodec::Struct(fields) => {
            FieldValue::Struct(decode_fields(fields, reader, ctx, Some(scope), depth + 1)?)
        }
        FieldCodec::Gated { bits, inner } => {
            if gate_open(*bits, site.required()?) {
                read_value(inner, site, reader, ctx, scope, depth)?
            } else {
                FieldValue::Absent
            }
        }
        FieldCodec::When { equals, inner } => {
            if site.required()? == *equals {
                read_value(inner, site, reader, ctx, scope, depth)?
            } else {
                FieldValue::Absent
            }
        }
        FieldCodec::Unless { equals, inner } => {
            if site.required()? == *equals {
                FieldValue::Absent
            } else {
                read_value(inner, site, reader, ctx, scope, depth)?
            }
        }
        FieldCodec::Framed(inner) => read_framed(inner, site, reader, ctx, scope, depth)?,
        FieldCodec::Switch(variants) => {
            let discriminant = site.required()?;
            let variant = find_variant(variants, discriminant).ok_or(
                CodecError::UnknownDiscriminant {
                    field: site.field.name,
                    value: discriminant,
                    offset: reader.position(),
                },
            )?;
            let fields = decode_fields(variant.fields, reader, ctx, Some(scope), depth + 1)?;
            FieldValue::Variant(VariantValue::new(discriminant, fields))
        }
        FieldCodec::Union { tag, variants } => {
            let offset = reader.position();
            let raw = read_value(tag, site, reader, ctx, scope, depth)?;
            let discriminant = raw.as_i64().ok_or(site.invalid(ValueReason::TypeMismatch {
                expected: "integer",
                found: raw.kind(),
            }))?;
            let variant = find_variant(variants, discriminant).ok_or(
                CodecError::UnknownDiscriminant {
                    field: site.field.name,
                    value: discriminant,
                    offset,
                },
            )?;
            let fields = decode_fields(variant.fields, reader, ctx, Some(scope), depth + 1)?;
            FieldValue::Variant(VariantValue::new(discriminant, fields))
        }
    };
    Ok(value)
}

fn read_elements(
    element: &'static FieldCodec,
    count: usize,
    site: Site,
    reader: &mut ByteReader<'_>,
    ctx: FieldContext<'_>,
    scope: &Scope<'_>,
    depth: usize,
) -> CodecResult<FieldValue> {
    if count > ctx.limits.max_array_len {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::ArrayLength,
            limit: ctx.limits.max_array_len,
            actual: count,
        });
    }
    let mut items = Vec::with_capacity(count.min(reader.remaining()));
    for _ in 0..count {
        items.push(read_value(element, site, reader, ctx, scope, depth + 1)?);
    }
    Ok(FieldValue::Array(items))
}

/// Reads a length-framed value. Offsets in errors raised by the inner codec
/// are relative to the start of the frame.
fn read_framed(
    inner: &'static FieldCodec,
    site: Site,
    reader: &mut ByteReader<'_>,
    ctx: FieldContext<'_>,
    scope: &Scope<'_>,
    depth: usize,
) -> CodecResult<FieldValue> {
    let offset = reader.position();
    let frame = reader.read_var_bytes()?;
    if frame.is_empty() {
        return Ok(FieldValue::Absent);
    }
    check_length(ctx, frame.len())?;
    let mut inner_reader = ByteReader::new(frame);
    let value = read_value(inner, site, &mut inner_reader, ctx, scope, depth)?;
    if !inner_reader.is_empty() {
        return Err(CodecError::FrameLength {
            field: site.field.name,
            offset,
            declared: frame.len(),
            consumed: inner_reader.position(),
        });
    }
    Ok(value)
}

fn read_inline_tag(
    site: Site,
    reader: &mut ByteReader<'_>,
    ctx: FieldContext<'_>,
    flavor: TagFlavor,
) -> CodecResult<Vec<u8>> {
    let field = site.field.name;
    let grammar = ctx
        .grammar
        .ok_or(CodecError::TagGrammarUnavailable { field })?;
    let offset = reader.position();
    let len = grammar
        .span(reader.peek_remaining(), flavor)
        .map_err(|source| CodecError::Tag {
            field,
            offset,
            source,
        })?;
    check_length(ctx, len)?;
    Ok(reader.read_bytes(len)?.to_vec())
}

fn read_prefixed_tag(
    site: Site,
    reader: &mut ByteReader<'_>,
    ctx: FieldContext<'_>,
) -> CodecResult<Vec<u8>> {
    let field = site.field.name;
    let offset = reader.position();
    let bytes = reader.read_var_bytes()?;
    check_length(ctx, bytes.len())?;
    if let Some(grammar) = ctx.grammar {
        let len = grammar.span(bytes, TagFlavor::Network).map_err(|source| CodecError::Tag {
            field,
            offset,
            source,
        })?;
        if len != bytes.len() {
            return Err(CodecError::Tag {
                field,
                offset,
                source: TagError::new(format!(
                    "tag spans {len} bytes but its prefix declares {}",
                    bytes.len()
                )),
            });
        }
    }
    Ok(bytes.to_vec())
}

fn write_value(
    codec: &'static FieldCodec,
    value: &FieldValue,
    site: Site,
    writer: &mut ByteWriter,
    ctx: FieldContext<'_>,
    scope: &Scope<'_>,
) -> CodecResult<()> {
    let endian = site.field.byte_order();
    match (codec, value) {
        (FieldCodec::Bool, FieldValue::Bool(v)) => writer.write_bool(*v),
        (FieldCodec::U8, FieldValue::UInt(v)) => writer.write_u8(narrow_unsigned(site, codec, *v)?),
        (FieldCodec::I8, FieldValue::SInt(v)) => writer.write_i8(narrow_signed(site, codec, *v)?),
        (FieldCodec::U16, FieldValue::UInt(v)) => {
            writer.write_u16(narrow_unsigned(site, codec, *v)?, endian);
        }
        (FieldCodec::I16, FieldValue::SInt(v)) => {
            writer.write_i16(narrow_signed(site, codec, *v)?, endian);
        }
        (FieldCodec::U32, FieldValue::UInt(v)) => {
            writer.write_u32(narrow_unsigned(site, codec, *v)?, endian);
        }
        (FieldCodec::I32, FieldValue::SInt(v)) => {
            writer.write_i32(narrow_signed(site, codec, *v)?, endian);
        }
        (FieldCodec::U64, FieldValue::UInt(v)) => writer.write_u64(*v, endian),
        (FieldCodec::I64, FieldValue::SInt(v)) => writer.write_i64(*v, endian),
        (FieldCodec::F32, FieldValue::F32(v)) => writer.write_f32(*v, endian),
        (FieldCodec::F64, FieldValue::F64(v)) => writer.write_f64(*v, endian),
        (FieldCodec::VarInt, FieldValue::UInt(v)) => {
            writer.write_var_u32(narrow_unsigned(site, codec, *v)?);
        }
        (FieldCodec::VarLong, FieldValue::UInt(v)) => writer.write_var_u64(*v),
        (FieldCodec::ZigZag, FieldValue::SInt(v)) => {
            writer.write_zigzag32(narrow_signed(site, codec, *v)?);
        }
        (FieldCodec::ZigZong, FieldValue::SInt(v)) => writer.write_zigzag64(*v),
        (FieldCodec::VarString, FieldValue::Str(v)) => writer.write_var_string(v)?,
        (FieldCodec::String32, FieldValue::Str(v)) => writer.write_string32(v, endian)?,
        (FieldCodec::VarBytes | FieldCodec::PrefixedTag, FieldValue::Bytes(v)) => {
            writer.write_var_bytes(v)?;
        }
        (FieldCodec::Tag | FieldCodec::FixedTag, FieldValue::Bytes(v)) => writer.write_bytes(v),
        (FieldCodec::Vec2f, FieldValue::Vec2(v)) => v.write(writer, endian),
        (FieldCodec::Vec3f, FieldValue::Vec3(v)) => v.write(writer, endian),
        (FieldCodec::BlockPosition, FieldValue::BlockPos(v)) => {
            v.write(writer).map_err(|reason| site.invalid(reason))?;
        }
        (FieldCodec::BlockCoordinates, FieldValue::BlockPos(v)) => {
            v.write_coordinates(writer)
                .map_err(|reason| site.invalid(reason))?;
        }
        (FieldCodec::Rotation, FieldValue::Rotation(v)) => v.write(writer),
        (FieldCodec::Color, FieldValue::Color(v)) => v.write(writer, endian),
        (FieldCodec::Optional(_), FieldValue::Absent) => writer.write_bool(false),
        (FieldCodec::Optional(inner), present) => {
            writer.write_bool(true);
            write_value(inner, present, site, writer, ctx, scope)?;
        }
        (FieldCodec::Array(element), FieldValue::Array(items)) => {
            writer.write_var_u32(count_prefix(items.len())?);
            write_elements(element, items, site, writer, ctx, scope)?;
        }
        (FieldCodec::CountedArray { prefix, element }, FieldValue::Array(items)) => {
            match prefix {
                CountPrefix::U16 => writer.write_u16(count_prefix(items.len())?, endian),
                CountPrefix::U32 => writer.write_u32(count_prefix(items.len())?, endian),
            }
            write_elements(element, items, site, writer, ctx, scope)?;
        }
        (FieldCodec::Struct(fields), FieldValue::Struct(values)) => {
            encode_fields(fields, values, site.field.name, writer, ctx, Some(scope))?;
        }
        (FieldCodec::Gated { bits, inner }, value) => {
            let open = gate_open(*bits, site.required()?);
            write_conditional(open, inner, value, site, writer, ctx, scope)?;
        }
        (FieldCodec::When { equals, inner }, value) => {
            let open = site.required()? == *equals;
            write_conditional(open, inner, value, site, writer, ctx, scope)?;
        }
        (FieldCodec::Unless { equals, inner }, value) => {
            let open = site.required()? != *equals;
            write_conditional(open, inner, value, site, writer, ctx, scope)?;
        }
        (FieldCodec::Framed(_), FieldValue::Absent) => writer.write_var_u32(0),
        (FieldCodec::Framed(inner), present) => {
            let mut frame = ByteWriter::new();
            write_value(inner, present, site, &mut frame, ctx, scope)?;
            writer.write_var_bytes(frame.as_slice())?;
        }
        (FieldCodec::Switch(variants), FieldValue::Variant(v)) => {
            let expected = site.required()?;
            if v.discriminant != expected {
                return Err(site.invalid(ValueReason::VariantMismatch {
                    expected,
                    found: v.discriminant,
                }));
            }
            let variant = find_variant(variants, expected)
                .ok_or(site.invalid(ValueReason::UnknownVariant {
                    discriminant: expected,
                }))?;
            encode_fields(variant.fields, &v.fields, variant.name, writer, ctx, Some(scope))?;
        }
        (FieldCodec::Union { tag, variants }, FieldValue::Variant(v)) => {
            let variant = find_variant(variants, v.discriminant).ok_or(site.invalid(
                ValueReason::UnknownVariant {
                    discriminant: v.discriminant,
                },
            ))?;
            write_value(tag, &integer_value(tag, v.discriminant), site, writer, ctx, scope)?;
            encode_fields(variant.fields, &v.fields, variant.name, writer, ctx, Some(scope))?;
        }
        (codec, value) => {
            return Err(site.invalid(ValueReason::TypeMismatch {
                expected: codec.name(),
                found: value.kind(),
            }));
        }
    }
    Ok(())
}

fn write_elements(
    element: &'static FieldCodec,
    items: &[FieldValue],
    site: Site,
    writer: &mut ByteWriter,
    ctx: FieldContext<'_>,
    scope: &Scope<'_>,
) -> CodecResult<()> {
    for item in items {
        write_value(element, item, site, writer, ctx, scope)?;
    }
    Ok(())
}

fn write_conditional(
    open: bool,
    inner: &'static FieldCodec,
    value: &FieldValue,
    site: Site,
    writer: &mut ByteWriter,
    ctx: FieldContext<'_>,
    scope: &Scope<'_>,
) -> CodecResult<()> {
    match (open, value.is_absent()) {
        (true, false) => write_value(inner, value, site, writer, ctx, scope),
        (false, true) => Ok(()),
        (gate_open, _) => Err(site.invalid(ValueReason::PresenceMismatch { gate_open })),
    }
}

#[allow(clippy::cast_sign_loss)]
const fn gate_open(bits: u64, value: i64) -> bool {
    (value as u64) & bits == bits
}

fn find_variant(variants: &'static [Variant], discriminant: i64) -> Option<&'static Variant> {
    variants
        .iter()
        .find(|variant| variant.discriminant == discriminant)
}

/// Builds the value a union tag codec expects for `discriminant`.
#[allow(clippy::cast_sign_loss)]
const fn integer_value(codec: &FieldCodec, discriminant: i64) -> FieldValue {
    match codec {
        FieldCodec::Bool => FieldValue::Bool(discriminant != 0),
        FieldCodec::I8
        | FieldCodec::I16
        | FieldCodec::I32
        | FieldCodec::I64
        | FieldCodec::ZigZag
        | FieldCodec::ZigZong => FieldValue::SInt(discriminant),
        _ => FieldValue::UInt(discriminant as u64),
    }
}

fn widen(count: u32) -> usize {
    usize::try_from(count).unwrap_or(usize::MAX)
}

fn check_length(ctx: FieldContext<'_>, len: usize) -> CodecResult<()> {
    if len > ctx.limits.max_string_len {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::StringLength,
            limit: ctx.limits.max_string_len,
            actual: len,
        });
    }
    Ok(())
}

fn count_prefix<T: TryFrom<usize>>(len: usize) -> CodecResult<T> {
    T::try_from(len).map_err(|_| CodecError::Stream(StreamError::LengthOverflow { length: len }))
}

fn narrow_unsigned<T: TryFrom<u64>>(site: Site, codec: &FieldCodec, value: u64) -> CodecResult<T> {
    T::try_from(value).map_err(|_| {
        site.invalid(ValueReason::UnsignedOutOfRange {
            codec: codec.name(),
            value,
        })
    })
}

fn narrow_signed<T: TryFrom<i64>>(site: Site, codec: &FieldCodec, value: i64) -> CodecResult<T> {
    T::try_from(value).map_err(|_| {
        site.invalid(ValueReason::SignedOutOfRange {
            codec: codec.name(),
            value,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FirstByteLength;

    impl TagGrammar for FirstByteLength {
        fn span(&self, input: &[u8], _flavor: TagFlavor) -> Result<usize, TagError> {
            input
                .first()
                .map(|len| usize::from(*len) + 1)
                .ok_or_else(|| TagError::new("empty input"))
        }
    }

    fn encode_with(
        fields: &'static [FieldDef],
        values: &[FieldValue],
        limits: &CodecLimits,
        grammar: Option<&dyn TagGrammar>,
    ) -> CodecResult<Vec<u8>> {
        let mut writer = ByteWriter::new();
        let ctx = FieldContext { limits, grammar };
        encode_fields(fields, values, "test", &mut writer, ctx, None)?;
        Ok(writer.finish())
    }

    fn decode_with(
        fields: &'static [FieldDef],
        bytes: &[u8],
        limits: &CodecLimits,
        grammar: Option<&dyn TagGrammar>,
    ) -> CodecResult<Vec<FieldValue>> {
        let mut reader = ByteReader::new(bytes);
        let ctx = FieldContext { limits, grammar };
        let values = decode_fields(fields, &mut reader, ctx, None, 0)?;
        assert!(reader.is_empty(), "decode left {} bytes", reader.remaining());
        Ok(values)
    }

    fn encode(fields: &'static [FieldDef], values: &[FieldValue]) -> CodecResult<Vec<u8>> {
        encode_with(fields, values, &CodecLimits::default(), None)
    }

    fn decode(fields: &'static [FieldDef], bytes: &[u8]) -> CodecResult<Vec<FieldValue>> {
        decode_with(fields, bytes, &CodecLimits::default(), None)
    }

    #[test]
    fn primitives_golden() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("flag", FieldCodec::Bool),
            FieldDef::new("small", FieldCodec::U8),
            FieldDef::new("level", FieldCodec::I16).big_endian(),
            FieldDef::new("count", FieldCodec::VarInt),
            FieldDef::new("delta", FieldCodec::ZigZag),
            FieldDef::new("name", FieldCodec::VarString),
        ];
        let values = vec![
            FieldValue::Bool(true),
            FieldValue::UInt(7),
            FieldValue::SInt(-2),
            FieldValue::UInt(300),
            FieldValue::SInt(-3),
            FieldValue::from("hi"),
        ];
        let bytes = encode(FIELDS, &values).unwrap();
        assert_eq!(
            bytes,
            [0x01, 0x07, 0xFF, 0xFE, 0xAC, 0x02, 0x05, 0x02, b'h', b'i']
        );
        assert_eq!(decode(FIELDS, &bytes).unwrap(), values);
    }

    #[test]
    fn optional_presence_flag() {
        static FIELDS: &[FieldDef] = &[FieldDef::new("a", FieldCodec::optional(&FieldCodec::U8))];
        assert_eq!(encode(FIELDS, &[FieldValue::Absent]).unwrap(), [0x00]);
        assert_eq!(encode(FIELDS, &[FieldValue::UInt(5)]).unwrap(), [0x01, 0x05]);
        assert_eq!(decode(FIELDS, &[0x00]).unwrap(), [FieldValue::Absent]);
        assert_eq!(decode(FIELDS, &[0x01, 0x05]).unwrap(), [FieldValue::UInt(5)]);
    }

    #[test]
    fn gated_fields_follow_mask() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("flags", FieldCodec::VarLong),
            FieldDef::new("extra", FieldCodec::gated(0b0100, &FieldCodec::F32)).depends_on("flags"),
            FieldDef::new("other", FieldCodec::gated(0b0001, &FieldCodec::U8)).depends_on("flags"),
        ];
        let values = vec![FieldValue::UInt(4), FieldValue::F32(1.0), FieldValue::Absent];
        let bytes = encode(FIELDS, &values).unwrap();
        assert_eq!(bytes, [0x04, 0x00, 0x00, 0x80, 0x3F]);
        assert_eq!(decode(FIELDS, &bytes).unwrap(), values);
    }

    #[test]
    fn gate_presence_must_agree() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("flags", FieldCodec::VarLong),
            FieldDef::new("extra", FieldCodec::gated(0b0100, &FieldCodec::F32)).depends_on("flags"),
        ];
        let err = encode(FIELDS, &[FieldValue::UInt(4), FieldValue::Absent]).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidValue {
                field: "extra",
                reason: ValueReason::PresenceMismatch { gate_open: true }
            }
        );

        let err = encode(FIELDS, &[FieldValue::UInt(0), FieldValue::F32(1.0)]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidValue {
                reason: ValueReason::PresenceMismatch { gate_open: false },
                ..
            }
        ));
    }

    #[test]
    fn when_field_follows_equality() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("hide", FieldCodec::Bool),
            FieldDef::new("message", FieldCodec::when(0, &FieldCodec::VarString)).depends_on("hide"),
        ];
        let shown = vec![FieldValue::Bool(false), FieldValue::from("bye")];
        let bytes = encode(FIELDS, &shown).unwrap();
        assert_eq!(bytes, [0x00, 0x03, b'b', b'y', b'e']);
        assert_eq!(decode(FIELDS, &bytes).unwrap(), shown);

        let hidden = vec![FieldValue::Bool(true), FieldValue::Absent];
        assert_eq!(encode(FIELDS, &hidden).unwrap(), [0x01]);
        assert_eq!(decode(FIELDS, &[0x01]).unwrap(), hidden);
    }

    #[test]
    fn nested_struct_sees_enclosing_dependency() {
        const ENTRY: &[FieldDef] = &[
            FieldDef::new("score", FieldCodec::I32),
            FieldDef::new("identity", FieldCodec::when(0, &FieldCodec::U8)).depends_on("action"),
        ];
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("action", FieldCodec::U8),
            FieldDef::new("entries", FieldCodec::array(&FieldCodec::Struct(ENTRY))),
        ];
        let change = vec![
            FieldValue::UInt(0),
            FieldValue::Array(vec![FieldValue::Struct(vec![
                FieldValue::SInt(5),
                FieldValue::UInt(1),
            ])]),
        ];
        let bytes = encode(FIELDS, &change).unwrap();
        assert_eq!(bytes, [0x00, 0x01, 0x05, 0x00, 0x00, 0x00, 0x01]);
        assert_eq!(decode(FIELDS, &bytes).unwrap(), change);

        let remove = vec![
            FieldValue::UInt(1),
            FieldValue::Array(vec![FieldValue::Struct(vec![
                FieldValue::SInt(5),
                FieldValue::Absent,
            ])]),
        ];
        let bytes = encode(FIELDS, &remove).unwrap();
        assert_eq!(bytes, [0x01, 0x01, 0x05, 0x00, 0x00, 0x00]);
        assert_eq!(decode(FIELDS, &bytes).unwrap(), remove);
    }

    #[test]
    fn counted_array_uses_fixed_prefix() {
        static FIELDS: &[FieldDef] = &[FieldDef::new(
            "packs",
            FieldCodec::counted_array(CountPrefix::U16, &FieldCodec::VarString),
        )];
        let values = vec![FieldValue::Array(vec![FieldValue::from("a"), FieldValue::from("b")])];
        let bytes = encode(FIELDS, &values).unwrap();
        assert_eq!(bytes, [0x02, 0x00, 0x01, b'a', 0x01, b'b']);
        assert_eq!(decode(FIELDS, &bytes).unwrap(), values);
    }

    #[test]
    fn switch_selects_by_dependency() {
        const ONE: &[FieldDef] = &[FieldDef::new("value", FieldCodec::ZigZag)];
        const VARIANTS: &[Variant] = &[Variant::new(1, "One", ONE), Variant::new(3, "Three", &[])];
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("kind", FieldCodec::U8),
            FieldDef::new("payload", FieldCodec::Switch(VARIANTS)).depends_on("kind"),
        ];
        let values = vec![
            FieldValue::UInt(1),
            FieldValue::from(VariantValue::new(1, vec![FieldValue::SInt(-1)])),
        ];
        let bytes = encode(FIELDS, &values).unwrap();
        assert_eq!(bytes, [0x01, 0x01]);
        assert_eq!(decode(FIELDS, &bytes).unwrap(), values);

        let err = decode(FIELDS, &[0x02]).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnknownDiscriminant {
                field: "payload",
                value: 2,
                offset: 1
            }
        );
    }

    #[test]
    fn switch_variant_must_match_dependency() {
        const VARIANTS: &[Variant] = &[Variant::new(1, "One", &[]), Variant::new(3, "Three", &[])];
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("kind", FieldCodec::U8),
            FieldDef::new("payload", FieldCodec::Switch(VARIANTS)).depends_on("kind"),
        ];
        let err = encode(
            FIELDS,
            &[
                FieldValue::UInt(1),
                FieldValue::from(VariantValue::new(3, Vec::new())),
            ],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidValue {
                reason: ValueReason::VariantMismatch {
                    expected: 1,
                    found: 3
                },
                ..
            }
        ));
    }

    #[test]
    fn union_writes_tag_inline() {
        const BYTE: &[FieldDef] = &[FieldDef::new("value", FieldCodec::I8)];
        const TEXT: &[FieldDef] = &[FieldDef::new("value", FieldCodec::VarString)];
        const VARIANTS: &[Variant] = &[Variant::new(0, "Byte", BYTE), Variant::new(4, "String", TEXT)];
        static FIELDS: &[FieldDef] = &[FieldDef::new(
            "value",
            FieldCodec::Union {
                tag: &FieldCodec::VarInt,
                variants: VARIANTS,
            },
        )];
        let values = vec![FieldValue::from(VariantValue::new(4, vec![FieldValue::from("ok")]))];
        let bytes = encode(FIELDS, &values).unwrap();
        assert_eq!(bytes, [0x04, 0x02, b'o', b'k']);
        assert_eq!(decode(FIELDS, &bytes).unwrap(), values);

        let err = decode(FIELDS, &[0x09]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnknownDiscriminant {
                value: 9,
                offset: 0,
                ..
            }
        ));

        let err = encode(FIELDS, &[FieldValue::from(VariantValue::new(7, Vec::new()))]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidValue {
                reason: ValueReason::UnknownVariant { discriminant: 7 },
                ..
            }
        ));
    }

    #[test]
    fn inline_tag_needs_grammar() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("nbt", FieldCodec::Tag),
            FieldDef::new("after", FieldCodec::U8),
        ];
        let bytes = [0x02, 0xAA, 0xBB, 0x07];
        let err = decode(FIELDS, &bytes).unwrap_err();
        assert_eq!(err, CodecError::TagGrammarUnavailable { field: "nbt" });

        let values =
            decode_with(FIELDS, &bytes, &CodecLimits::default(), Some(&FirstByteLength)).unwrap();
        assert_eq!(
            values,
            [
                FieldValue::Bytes(vec![0x02, 0xAA, 0xBB]),
                FieldValue::UInt(7)
            ]
        );
        assert_eq!(encode(FIELDS, &values).unwrap(), bytes);
    }

    #[test]
    fn inline_tag_grammar_error_carries_offset() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("lead", FieldCodec::U8),
            FieldDef::new("nbt", FieldCodec::Tag),
        ];
        let err = decode_with(FIELDS, &[0x01], &CodecLimits::default(), Some(&FirstByteLength))
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::Tag {
                field: "nbt",
                offset: 1,
                ..
            }
        ));
    }

    #[test]
    fn prefixed_tag_skips_without_grammar() {
        static FIELDS: &[FieldDef] = &[FieldDef::new("nbt", FieldCodec::PrefixedTag)];
        let bytes = [0x02, 0x01, 0xAA];
        assert_eq!(
            decode(FIELDS, &bytes).unwrap(),
            [FieldValue::Bytes(vec![0x01, 0xAA])]
        );
        let checked =
            decode_with(FIELDS, &bytes, &CodecLimits::default(), Some(&FirstByteLength)).unwrap();
        assert_eq!(checked, [FieldValue::Bytes(vec![0x01, 0xAA])]);

        let mismatched = [0x02, 0x05, 0xAA];
        let err = decode_with(FIELDS, &mismatched, &CodecLimits::default(), Some(&FirstByteLength))
            .unwrap_err();
        assert!(matches!(err, CodecError::Tag { offset: 0, .. }));
    }

    struct FixedOnly;

    impl TagGrammar for FixedOnly {
        fn span(&self, input: &[u8], flavor: TagFlavor) -> Result<usize, TagError> {
            match flavor {
                TagFlavor::Fixed => FirstByteLength.span(input, flavor),
                TagFlavor::Network => Err(TagError::new("network flavor")),
            }
        }
    }

    #[test]
    fn fixed_tag_asks_for_fixed_flavor() {
        static FIELDS: &[FieldDef] = &[FieldDef::new("nbt", FieldCodec::FixedTag)];
        let values =
            decode_with(FIELDS, &[0x01, 0xAA], &CodecLimits::default(), Some(&FixedOnly)).unwrap();
        assert_eq!(values, [FieldValue::Bytes(vec![0x01, 0xAA])]);

        static NETWORK: &[FieldDef] = &[FieldDef::new("nbt", FieldCodec::Tag)];
        let err = decode_with(NETWORK, &[0x01, 0xAA], &CodecLimits::default(), Some(&FixedOnly))
            .unwrap_err();
        assert!(matches!(err, CodecError::Tag { field: "nbt", .. }));
    }

    #[test]
    fn unless_field_skips_on_equality() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("id", FieldCodec::ZigZag),
            FieldDef::new("count", FieldCodec::unless(0, &FieldCodec::U16)).depends_on("id"),
        ];
        let air = vec![FieldValue::SInt(0), FieldValue::Absent];
        assert_eq!(encode(FIELDS, &air).unwrap(), [0x00]);
        assert_eq!(decode(FIELDS, &[0x00]).unwrap(), air);

        let stone = vec![FieldValue::SInt(1), FieldValue::UInt(64)];
        let bytes = encode(FIELDS, &stone).unwrap();
        assert_eq!(bytes, [0x02, 0x40, 0x00]);
        assert_eq!(decode(FIELDS, &bytes).unwrap(), stone);

        let err = encode(FIELDS, &[FieldValue::SInt(0), FieldValue::UInt(1)]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidValue {
                reason: ValueReason::PresenceMismatch { gate_open: false },
                ..
            }
        ));
    }

    #[test]
    fn framed_value_carries_byte_length() {
        const INNER: &[FieldDef] = &[
            FieldDef::new("marker", FieldCodec::U16),
            FieldDef::new("ticking", FieldCodec::when(362, &FieldCodec::U8)).depends_on("id"),
        ];
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("id", FieldCodec::ZigZag),
            FieldDef::new("extras", FieldCodec::framed(&FieldCodec::Struct(INNER))),
            FieldDef::new("after", FieldCodec::U8),
        ];
        let shield = vec![
            FieldValue::SInt(362),
            FieldValue::Struct(vec![FieldValue::UInt(0), FieldValue::UInt(9)]),
            FieldValue::UInt(7),
        ];
        let bytes = encode(FIELDS, &shield).unwrap();
        assert_eq!(bytes, [0xD4, 0x05, 0x03, 0x00, 0x00, 0x09, 0x07]);
        assert_eq!(decode(FIELDS, &bytes).unwrap(), shield);

        let empty = vec![FieldValue::SInt(1), FieldValue::Absent, FieldValue::UInt(7)];
        let bytes = encode(FIELDS, &empty).unwrap();
        assert_eq!(bytes, [0x02, 0x00, 0x07]);
        assert_eq!(decode(FIELDS, &bytes).unwrap(), empty);
    }

    #[test]
    fn framed_value_must_fill_its_frame() {
        static FIELDS: &[FieldDef] = &[FieldDef::new("extras", FieldCodec::framed(&FieldCodec::U16))];
        let err = decode(FIELDS, &[0x03, 0x01, 0x00, 0xFF]).unwrap_err();
        assert_eq!(
            err,
            CodecError::FrameLength {
                field: "extras",
                offset: 0,
                declared: 3,
                consumed: 2
            }
        );
        assert!(matches!(
            decode(FIELDS, &[0x01, 0x01]).unwrap_err(),
            CodecError::Stream(_)
        ));
    }

    #[test]
    fn type_mismatch_names_both_sides() {
        static FIELDS: &[FieldDef] = &[FieldDef::new("yaw", FieldCodec::Rotation)];
        let err = encode(FIELDS, &[FieldValue::from("north")]).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidValue {
                field: "yaw",
                reason: ValueReason::TypeMismatch {
                    expected: "rotation",
                    found: "string"
                }
            }
        );
    }

    #[test]
    fn narrowing_rejects_out_of_range() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("small", FieldCodec::U8),
            FieldDef::new("delta", FieldCodec::ZigZag),
        ];
        let err = encode(FIELDS, &[FieldValue::UInt(256), FieldValue::SInt(0)]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidValue {
                field: "small",
                reason: ValueReason::UnsignedOutOfRange { value: 256, .. }
            }
        ));

        let err = encode(FIELDS, &[FieldValue::UInt(0), FieldValue::SInt(i64::MIN)]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidValue {
                field: "delta",
                reason: ValueReason::SignedOutOfRange { .. }
            }
        ));
    }

    #[test]
    fn field_count_must_match() {
        static FIELDS: &[FieldDef] = &[FieldDef::new("a", FieldCodec::U8)];
        let err = encode(FIELDS, &[]).unwrap_err();
        assert_eq!(
            err,
            CodecError::FieldCountMismatch {
                scope: "test",
                expected: 1,
                actual: 0
            }
        );
    }

    #[test]
    fn truncation_is_stream_error() {
        static FIELDS: &[FieldDef] = &[FieldDef::new("value", FieldCodec::I32)];
        let err = decode(FIELDS, &[0x01, 0x02]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Stream(StreamError::EndOfBuffer { .. })
        ));
    }

    #[test]
    fn array_length_limited() {
        static FIELDS: &[FieldDef] = &[FieldDef::new("items", FieldCodec::array(&FieldCodec::U8))];
        let err = decode_with(FIELDS, &[0x41], &CodecLimits::for_testing(), None).unwrap_err();
        assert_eq!(
            err,
            CodecError::LimitsExceeded {
                kind: LimitKind::ArrayLength,
                limit: 64,
                actual: 65
            }
        );
    }

    #[test]
    fn string_length_limited() {
        static FIELDS: &[FieldDef] = &[FieldDef::new("text", FieldCodec::VarString)];
        let mut bytes = vec![0x81, 0x08];
        bytes.extend(std::iter::repeat(b'a').take(1025));
        let err = decode_with(FIELDS, &bytes, &CodecLimits::for_testing(), None).unwrap_err();
        assert!(matches!(
            err,
            CodecError::LimitsExceeded {
                kind: LimitKind::StringLength,
                actual: 1025,
                ..
            }
        ));
    }

    #[test]
    fn depth_limited() {
        const INNER: &[FieldDef] = &[FieldDef::new("x", FieldCodec::U8)];
        const MIDDLE: &[FieldDef] = &[FieldDef::new("inner", FieldCodec::Struct(INNER))];
        static FIELDS: &[FieldDef] = &[FieldDef::new("outer", FieldCodec::Struct(MIDDLE))];
        let limits = CodecLimits {
            max_depth: 1,
            ..CodecLimits::for_testing()
        };
        let err = decode_with(FIELDS, &[0x00], &limits, None).unwrap_err();
        assert_eq!(
            err,
            CodecError::LimitsExceeded {
                kind: LimitKind::Depth,
                limit: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn block_position_value_error_names_field() {
        static FIELDS: &[FieldDef] = &[FieldDef::new("position", FieldCodec::BlockPosition)];
        let err = encode(
            FIELDS,
            &[FieldValue::BlockPos(BlockPosition::new(0, 1 << 33, 0))],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidValue {
                field: "position",
                reason: ValueReason::SignedOutOfRange { .. }
            }
        ));
    }

    #[test]
    fn unsigned_mask_above_i64_range() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("flags", FieldCodec::VarLong),
            FieldDef::new("top", FieldCodec::gated(1 << 63, &FieldCodec::U8)).depends_on("flags"),
        ];
        let values = vec![FieldValue::UInt(1 << 63), FieldValue::UInt(9)];
        let bytes = encode(FIELDS, &values).unwrap();
        assert_eq!(decode(FIELDS, &bytes).unwrap(), values);
    }
}
