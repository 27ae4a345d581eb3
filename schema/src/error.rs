//! Shape validation errors.

use std::fmt;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when validating a message shape.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    /// Two fields in one scope share a name.
    DuplicateFieldName { field: &'static str },

    /// `depends_on` names no earlier field in scope.
    UnknownDependency {
        field: &'static str,
        depends_on: &'static str,
    },

    /// `depends_on` names a field whose values are not integers.
    DependencyNotInteger {
        field: &'static str,
        depends_on: &'static str,
    },

    /// The codec consumes a dependency but the field declares none.
    MissingDependency { field: &'static str },

    /// The field declares a dependency its codec never reads.
    UnusedDependency { field: &'static str },

    /// A byte-order override on a codec without byte order.
    EndianNotSupported { field: &'static str },

    /// A switch or union with no variants.
    EmptyVariantSet { field: &'static str },

    /// Two variants share a discriminant.
    DuplicateDiscriminant {
        field: &'static str,
        discriminant: i64,
    },

    /// A union tag codec that does not produce integers.
    InvalidUnionTag { field: &'static str },

    /// A gate that tests no bits.
    EmptyGateMask { field: &'static str },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateFieldName { field } => {
                write!(f, "duplicate field name '{field}'")
            }
            Self::UnknownDependency { field, depends_on } => {
                write!(
                    f,
                    "field '{field}' depends on '{depends_on}', which is not an earlier field"
                )
            }
            Self::DependencyNotInteger { field, depends_on } => {
                write!(
                    f,
                    "field '{field}' depends on '{depends_on}', which is not an integer field"
                )
            }
            Self::MissingDependency { field } => {
                write!(f, "field '{field}' needs a dependency but declares none")
            }
            Self::UnusedDependency { field } => {
                write!(f, "field '{field}' declares a dependency its codec never reads")
            }
            Self::EndianNotSupported { field } => {
                write!(f, "field '{field}' has a byte-order override but no byte order")
            }
            Self::EmptyVariantSet { field } => {
                write!(f, "field '{field}' has no variants")
            }
            Self::DuplicateDiscriminant {
                field,
                discriminant,
            } => {
                write!(f, "field '{field}' declares discriminant {discriminant} twice")
            }
            Self::InvalidUnionTag { field } => {
                write!(f, "field '{field}' has a non-integer union tag")
            }
            Self::EmptyGateMask { field } => {
                write!(f, "field '{field}' is gated on an empty bitmask")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_unknown_dependency() {
        let err = SchemaError::UnknownDependency {
            field: "message",
            depends_on: "kind",
        };
        let msg = err.to_string();
        assert!(msg.contains("message"));
        assert!(msg.contains("kind"));
    }

    #[test]
    fn error_display_duplicate_discriminant() {
        let err = SchemaError::DuplicateDiscriminant {
            field: "payload",
            discriminant: -3,
        };
        let msg = err.to_string();
        assert!(msg.contains("payload"));
        assert!(msg.contains("-3"));
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<SchemaError>();
    }
}
