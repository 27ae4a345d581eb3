//! Decoded messages.

use schema::MessageShape;

use crate::value::FieldValue;

/// A message: its shape and one value per top-level field.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    shape: &'static MessageShape,
    fields: Vec<FieldValue>,
}

impl Message {
    /// Pairs values with a shape. Counts are checked when encoding.
    #[must_use]
    pub const fn new(shape: &'static MessageShape, fields: Vec<FieldValue>) -> Self {
        Self { shape, fields }
    }

    #[must_use]
    pub const fn shape(&self) -> &'static MessageShape {
        self.shape
    }

    #[must_use]
    pub const fn id(&self) -> u32 {
        self.shape.id
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.shape.name
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldValue] {
        &self.fields
    }

    #[must_use]
    pub fn into_fields(self) -> Vec<FieldValue> {
        self.fields
    }

    /// Returns the value of a top-level field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.shape
            .field_index(name)
            .and_then(|index| self.fields.get(index))
    }
}
