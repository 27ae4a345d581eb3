//! Message shapes and their validation.

use std::collections::HashSet;

use crate::error::{SchemaError, SchemaResult};
use crate::field::{FieldCodec, FieldDef, Variant};

/// An identified, ordered list of fields.
///
/// Field order is the wire order; reordering `fields` is a binary-incompatible
/// change and shows up in [`crate::shape_hash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageShape {
    pub id: u32,
    pub name: &'static str,
    pub fields: &'static [FieldDef],
}

impl MessageShape {
    /// Creates a shape. Call [`MessageShape::validate`] before use.
    #[must_use]
    pub const fn new(id: u32, name: &'static str, fields: &'static [FieldDef]) -> Self {
        Self { id, name, fields }
    }

    /// Checks every dependency, variant set and override in the shape.
    pub fn validate(&self) -> SchemaResult<()> {
        validate_fields(self.fields)
    }

    /// Returns the index of a top-level field.
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }
}

/// Validates a top-level field list.
pub fn validate_fields(fields: &'static [FieldDef]) -> SchemaResult<()> {
    validate_scope(fields, &[])
}

fn validate_scope(fields: &'static [FieldDef], enclosing: &[&'static FieldDef]) -> SchemaResult<()> {
    let mut names = HashSet::with_capacity(fields.len());
    let mut visible: Vec<&'static FieldDef> = enclosing.to_vec();

    for field in fields {
        if !names.insert(field.name) {
            return Err(SchemaError::DuplicateFieldName { field: field.name });
        }

        match (field.depends_on, field.codec.needs_dependency()) {
            (Some(depends_on), true) => {
                let source = visible
                    .iter()
                    .rev()
                    .find(|earlier| earlier.name == depends_on)
                    .ok_or(SchemaError::UnknownDependency {
                        field: field.name,
                        depends_on,
                    })?;
                if !source.codec.is_integer() {
                    return Err(SchemaError::DependencyNotInteger {
                        field: field.name,
                        depends_on,
                    });
                }
            }
            (None, true) => {
                return Err(SchemaError::MissingDependency { field: field.name });
            }
            (Some(_), false) => {
                return Err(SchemaError::UnusedDependency { field: field.name });
            }
            (None, false) => {}
        }

        if field.endian.is_some() && !field.codec.supports_endian() {
            return Err(SchemaError::EndianNotSupported { field: field.name });
        }

        validate_codec(field.name, &field.codec, &visible)?;
        visible.push(field);
    }

    Ok(())
}

fn validate_codec(
    field: &'static str,
    codec: &FieldCodec,
    visible: &[&'static FieldDef],
) -> SchemaResult<()> {
    match codec {
        FieldCodec::Optional(inner)
        | FieldCodec::Array(inner)
        | FieldCodec::Framed(inner)
        | FieldCodec::When { inner, .. }
        | FieldCodec::Unless { inner, .. } => validate_codec(field, inner, visible),
        FieldCodec::CountedArray { element, .. } => validate_codec(field, element, visible),
        FieldCodec::Gated { bits, inner } => {
            if *bits == 0 {
                return Err(SchemaError::EmptyGateMask { field });
            }
            validate_codec(field, inner, visible)
        }
        FieldCodec::Struct(fields) => validate_scope(*fields, visible),
        FieldCodec::Switch(variants) => validate_variants(field, *variants, visible),
        FieldCodec::Union { tag, variants } => {
            if !tag.is_integer() {
                return Err(SchemaError::InvalidUnionTag { field });
            }
            validate_variants(field, *variants, visible)
        }
        _ => Ok(()),
    }
}

fn validate_variants(
    field: &'static str,
    variants: &'static [Variant],
    visible: &[&'static FieldDef],
) -> SchemaResult<()> {
    if variants.is_empty() {
        return Err(SchemaError::EmptyVariantSet { field });
    }
    let mut seen = HashSet::with_capacity(variants.len());
    for variant in variants {
        if !seen.insert(variant.discriminant) {
            return Err(SchemaError::DuplicateDiscriminant {
                field,
                discriminant: variant.discriminant,
            });
        }
        validate_scope(variant.fields, visible)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytestream::Endianness;

    fn check(fields: &'static [FieldDef]) -> SchemaResult<()> {
        MessageShape::new(1, "Test", fields).validate()
    }

    #[test]
    fn flat_shape_is_valid() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("time", FieldCodec::ZigZag),
            FieldDef::new("protocol", FieldCodec::I32).big_endian(),
        ];
        assert_eq!(check(FIELDS), Ok(()));
    }

    #[test]
    fn duplicate_field_name_rejected() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("a", FieldCodec::U8),
            FieldDef::new("a", FieldCodec::U8),
        ];
        assert_eq!(
            check(FIELDS),
            Err(SchemaError::DuplicateFieldName { field: "a" })
        );
    }

    #[test]
    fn dependency_must_be_earlier() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("extra", FieldCodec::gated(1, &FieldCodec::F32)).depends_on("flags"),
            FieldDef::new("flags", FieldCodec::VarLong),
        ];
        assert_eq!(
            check(FIELDS),
            Err(SchemaError::UnknownDependency {
                field: "extra",
                depends_on: "flags"
            })
        );
    }

    #[test]
    fn dependency_must_be_integer() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("label", FieldCodec::VarString),
            FieldDef::new("extra", FieldCodec::when(1, &FieldCodec::F32)).depends_on("label"),
        ];
        assert!(matches!(
            check(FIELDS),
            Err(SchemaError::DependencyNotInteger { .. })
        ));
    }

    #[test]
    fn gated_field_needs_dependency() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("flags", FieldCodec::VarLong),
            FieldDef::new("extra", FieldCodec::gated(1, &FieldCodec::F32)),
        ];
        assert_eq!(
            check(FIELDS),
            Err(SchemaError::MissingDependency { field: "extra" })
        );
    }

    #[test]
    fn plain_field_rejects_dependency() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("flags", FieldCodec::VarLong),
            FieldDef::new("extra", FieldCodec::F32).depends_on("flags"),
        ];
        assert_eq!(
            check(FIELDS),
            Err(SchemaError::UnusedDependency { field: "extra" })
        );
    }

    #[test]
    fn endian_override_needs_byte_order() {
        static FIELDS: &[FieldDef] = &[FieldDef::new("id", FieldCodec::VarInt).endian(Endianness::Big)];
        assert_eq!(
            check(FIELDS),
            Err(SchemaError::EndianNotSupported { field: "id" })
        );
    }

    #[test]
    fn nested_scope_sees_enclosing_fields() {
        const ENTRY: &[FieldDef] = &[
            FieldDef::new("score", FieldCodec::I32),
            FieldDef::new("name", FieldCodec::when(0, &FieldCodec::VarString)).depends_on("action"),
        ];
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("action", FieldCodec::U8),
            FieldDef::new("entries", FieldCodec::array(&FieldCodec::Struct(ENTRY))),
        ];
        assert_eq!(check(FIELDS), Ok(()));
    }

    #[test]
    fn nested_scope_does_not_leak_outward() {
        const INNER: &[FieldDef] = &[FieldDef::new("kind", FieldCodec::U8)];
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("inner", FieldCodec::Struct(INNER)),
            FieldDef::new("extra", FieldCodec::when(1, &FieldCodec::F32)).depends_on("kind"),
        ];
        assert!(matches!(
            check(FIELDS),
            Err(SchemaError::UnknownDependency { .. })
        ));
    }

    #[test]
    fn framed_struct_sees_fields_two_scopes_up() {
        const USER_DATA: &[FieldDef] = &[
            FieldDef::new("marker", FieldCodec::U16),
            FieldDef::new("ticking", FieldCodec::when(362, &FieldCodec::I64)).depends_on("network_id"),
        ];
        const BODY: &[FieldDef] = &[
            FieldDef::new("count", FieldCodec::U16),
            FieldDef::new("extras", FieldCodec::framed(&FieldCodec::Struct(USER_DATA))),
        ];
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("network_id", FieldCodec::ZigZag),
            FieldDef::new("body", FieldCodec::unless(0, &FieldCodec::Struct(BODY)))
                .depends_on("network_id"),
        ];
        assert_eq!(check(FIELDS), Ok(()));
    }

    #[test]
    fn unless_needs_dependency() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("network_id", FieldCodec::ZigZag),
            FieldDef::new("body", FieldCodec::unless(0, &FieldCodec::U8)),
        ];
        assert_eq!(
            check(FIELDS),
            Err(SchemaError::MissingDependency { field: "body" })
        );
    }

    #[test]
    fn switch_rules() {
        const EMPTY: &[Variant] = &[];
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("kind", FieldCodec::U8),
            FieldDef::new("payload", FieldCodec::Switch(EMPTY)).depends_on("kind"),
        ];
        assert_eq!(
            check(FIELDS),
            Err(SchemaError::EmptyVariantSet { field: "payload" })
        );

        const DUPLICATE: &[Variant] = &[Variant::new(1, "A", &[]), Variant::new(1, "B", &[])];
        static DUP_FIELDS: &[FieldDef] = &[
            FieldDef::new("kind", FieldCodec::U8),
            FieldDef::new("payload", FieldCodec::Switch(DUPLICATE)).depends_on("kind"),
        ];
        assert_eq!(
            check(DUP_FIELDS),
            Err(SchemaError::DuplicateDiscriminant {
                field: "payload",
                discriminant: 1
            })
        );
    }

    #[test]
    fn union_tag_must_be_integer() {
        const VARIANTS: &[Variant] = &[Variant::new(0, "A", &[])];
        static FIELDS: &[FieldDef] = &[FieldDef::new(
            "value",
            FieldCodec::Union {
                tag: &FieldCodec::F32,
                variants: VARIANTS,
            },
        )];
        assert_eq!(
            check(FIELDS),
            Err(SchemaError::InvalidUnionTag { field: "value" })
        );
    }

    #[test]
    fn empty_gate_rejected() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("flags", FieldCodec::VarLong),
            FieldDef::new("extra", FieldCodec::gated(0, &FieldCodec::F32)).depends_on("flags"),
        ];
        assert_eq!(
            check(FIELDS),
            Err(SchemaError::EmptyGateMask { field: "extra" })
        );
    }

    #[test]
    fn field_index_lookup() {
        static FIELDS: &[FieldDef] = &[
            FieldDef::new("a", FieldCodec::U8),
            FieldDef::new("b", FieldCodec::U8),
        ];
        let shape = MessageShape::new(3, "Pair", FIELDS);
        assert_eq!(shape.field_index("b"), Some(1));
        assert_eq!(shape.field_index("c"), None);
    }
}
