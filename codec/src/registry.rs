//! Identifier to shape mapping, validated once at startup.

use std::collections::HashMap;

use schema::{registry_hash, MessageShape};

use crate::error::RegistryError;

/// Collects shapes before validating them as a set.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    shapes: Vec<&'static MessageShape>,
}

impl RegistryBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Adds one shape under its own identifier.
    #[must_use]
    pub fn register(mut self, shape: &'static MessageShape) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Adds every shape in `shapes`.
    #[must_use]
    pub fn extend<I>(mut self, shapes: I) -> Self
    where
        I: IntoIterator<Item = &'static MessageShape>,
    {
        self.shapes.extend(shapes);
        self
    }

    /// Validates every shape and the mapping as a whole.
    ///
    /// Fails on the first invalid shape, on an identifier claimed twice, or on
    /// a name used twice. Both directions of the mapping are total over the
    /// registered shapes once this returns.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let mut by_id: HashMap<u32, &'static MessageShape> =
            HashMap::with_capacity(self.shapes.len());
        let mut by_name: HashMap<&'static str, &'static MessageShape> =
            HashMap::with_capacity(self.shapes.len());

        for &shape in &self.shapes {
            shape
                .validate()
                .map_err(|source| RegistryError::InvalidShape {
                    name: shape.name,
                    source,
                })?;
            if let Some(existing) = by_id.insert(shape.id, shape) {
                return Err(RegistryError::DuplicateId {
                    id: shape.id,
                    existing: existing.name,
                    duplicate: shape.name,
                });
            }
            if by_name.insert(shape.name, shape).is_some() {
                return Err(RegistryError::DuplicateName { name: shape.name });
            }
        }

        let mut order = self.shapes;
        order.sort_by_key(|shape| shape.id);

        let registry = Registry {
            by_id,
            by_name,
            order,
        };
        tracing::debug!(
            shapes = registry.len(),
            hash = registry.hash(),
            "registry built"
        );
        Ok(registry)
    }
}

/// Bidirectional mapping between packet identifiers and shapes.
#[derive(Debug, Clone)]
pub struct Registry {
    by_id: HashMap<u32, &'static MessageShape>,
    by_name: HashMap<&'static str, &'static MessageShape>,
    order: Vec<&'static MessageShape>,
}

impl Registry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Returns the shape registered under `id`.
    #[must_use]
    pub fn shape_for(&self, id: u32) -> Option<&'static MessageShape> {
        self.by_id.get(&id).copied()
    }

    /// Returns the identifier of a registered shape.
    ///
    /// A shape that shares a registered name but differs in layout is not
    /// considered registered.
    #[must_use]
    pub fn identifier_for(&self, shape: &MessageShape) -> Option<u32> {
        self.by_name
            .get(shape.name)
            .filter(|registered| **registered == shape)
            .map(|registered| registered.id)
    }

    #[must_use]
    pub fn shape_by_name(&self, name: &str) -> Option<&'static MessageShape> {
        self.by_name.get(name).copied()
    }

    /// Iterates shapes in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &'static MessageShape> + '_ {
        self.order.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Hash over every shape in identifier order.
    ///
    /// Peers with equal hashes agree on the bytes of every registered packet.
    #[must_use]
    pub fn hash(&self) -> u64 {
        registry_hash(self.order.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{FieldCodec, FieldDef, SchemaError};

    const TIME: &[FieldDef] = &[FieldDef::new("time", FieldCodec::ZigZag)];
    const RADIUS: &[FieldDef] = &[FieldDef::new("radius", FieldCodec::ZigZag)];
    const BROKEN: &[FieldDef] = &[
        FieldDef::new("a", FieldCodec::U8),
        FieldDef::new("a", FieldCodec::U8),
    ];

    static SET_TIME: MessageShape = MessageShape::new(10, "SetTime", TIME);
    static CHUNK_RADIUS: MessageShape = MessageShape::new(70, "ChunkRadiusUpdate", RADIUS);
    static CLASHING_ID: MessageShape = MessageShape::new(10, "Clash", RADIUS);
    static CLASHING_NAME: MessageShape = MessageShape::new(11, "SetTime", RADIUS);
    static INVALID: MessageShape = MessageShape::new(12, "Broken", BROKEN);

    fn registry() -> Registry {
        Registry::builder()
            .register(&CHUNK_RADIUS)
            .register(&SET_TIME)
            .build()
            .unwrap()
    }

    #[test]
    fn lookups_both_directions() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.shape_for(10).map(|s| s.name), Some("SetTime"));
        assert_eq!(registry.shape_for(11), None);
        assert_eq!(registry.identifier_for(&CHUNK_RADIUS), Some(70));
        assert_eq!(
            registry.shape_by_name("ChunkRadiusUpdate").map(|s| s.id),
            Some(70)
        );
    }

    #[test]
    fn iteration_in_id_order() {
        let ids: Vec<u32> = registry().iter().map(|shape| shape.id).collect();
        assert_eq!(ids, vec![10, 70]);
    }

    #[test]
    fn foreign_shape_with_same_name_not_registered() {
        let registry = Registry::builder().register(&SET_TIME).build().unwrap();
        assert_eq!(registry.identifier_for(&CLASHING_NAME), None);
    }

    #[test]
    fn duplicate_id_rejected() {
        let err = Registry::builder()
            .register(&SET_TIME)
            .register(&CLASHING_ID)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateId {
                id: 10,
                existing: "SetTime",
                duplicate: "Clash"
            }
        );
    }

    #[test]
    fn duplicate_name_rejected() {
        let err = Registry::builder()
            .register(&SET_TIME)
            .register(&CLASHING_NAME)
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName { name: "SetTime" });
    }

    #[test]
    fn invalid_shape_rejected() {
        let err = Registry::builder().register(&INVALID).build().unwrap_err();
        assert_eq!(
            err,
            RegistryError::InvalidShape {
                name: "Broken",
                source: SchemaError::DuplicateFieldName { field: "a" }
            }
        );
    }

    #[test]
    fn hash_independent_of_registration_order() {
        let forward = Registry::builder()
            .extend([&SET_TIME, &CHUNK_RADIUS])
            .build()
            .unwrap();
        assert_eq!(forward.hash(), registry().hash());
    }
}
