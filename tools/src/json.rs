//! JSON rendering of decoded messages.
//!
//! Values carry no field names of their own, so rendering walks the shape
//! alongside them.

use codec::{FieldValue, Message};
use schema::{FieldCodec, FieldDef, Variant};
use serde_json::{json, Map, Value};

/// Renders every field of `message` as a JSON object keyed by field name.
#[must_use]
pub fn message_to_json(message: &Message) -> Value {
    fields_to_json(message.shape().fields, message.fields())
}

fn fields_to_json(fields: &[FieldDef], values: &[FieldValue]) -> Value {
    let mut object = Map::with_capacity(fields.len());
    for (field, value) in fields.iter().zip(values) {
        object.insert(field.name.to_owned(), value_to_json(&field.codec, value));
    }
    Value::Object(object)
}

fn value_to_json(codec: &FieldCodec, value: &FieldValue) -> Value {
    match (codec, value) {
        (_, FieldValue::Absent) => Value::Null,
        (
            FieldCodec::Optional(inner)
            | FieldCodec::Framed(inner)
            | FieldCodec::Gated { inner, .. }
            | FieldCodec::When { inner, .. }
            | FieldCodec::Unless { inner, .. },
            value,
        ) => value_to_json(inner, value),
        (
            FieldCodec::Array(element) | FieldCodec::CountedArray { element, .. },
            FieldValue::Array(items),
        ) => Value::Array(items.iter().map(|item| value_to_json(element, item)).collect()),
        (FieldCodec::Struct(fields), FieldValue::Struct(values)) => fields_to_json(fields, values),
        (
            FieldCodec::Switch(variants) | FieldCodec::Union { variants, .. },
            FieldValue::Variant(variant),
        ) => variant_to_json(variants, variant.discriminant, &variant.fields),
        (_, value) => leaf_to_json(value),
    }
}

fn variant_to_json(variants: &[Variant], discriminant: i64, values: &[FieldValue]) -> Value {
    match variants.iter().find(|v| v.discriminant == discriminant) {
        Some(variant) => json!({
            "variant": variant.name,
            "discriminant": discriminant,
            "fields": fields_to_json(variant.fields, values),
        }),
        None => json!({
            "discriminant": discriminant,
            "fields": values.iter().map(leaf_to_json).collect::<Vec<_>>(),
        }),
    }
}

fn leaf_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Bool(v) => json!(v),
        FieldValue::UInt(v) => json!(v),
        FieldValue::SInt(v) => json!(v),
        FieldValue::F32(v) => json!(v),
        FieldValue::F64(v) => json!(v),
        FieldValue::Str(v) => json!(v),
        FieldValue::Bytes(v) => json!(hex::encode(v)),
        FieldValue::Vec2(v) => json!(v),
        FieldValue::Vec3(v) => json!(v),
        FieldValue::BlockPos(v) => json!(v),
        FieldValue::Rotation(v) => json!(v),
        FieldValue::Color(v) => json!(format!("#{:08X}", v.to_argb())),
        FieldValue::Array(items) => Value::Array(items.iter().map(leaf_to_json).collect()),
        FieldValue::Struct(items) => Value::Array(items.iter().map(leaf_to_json).collect()),
        FieldValue::Variant(v) => json!({
            "discriminant": v.discriminant,
            "fields": v.fields.iter().map(leaf_to_json).collect::<Vec<_>>(),
        }),
        FieldValue::Absent => Value::Null,
    }
}
