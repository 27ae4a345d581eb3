//! Error types for codec operations.

use std::fmt;

use bytestream::StreamError;
use schema::SchemaError;

use crate::tag::TagError;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding a message.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CodecError {
    /// Primitive read or write failed; truncation surfaces here.
    Stream(StreamError),

    /// The identifier has no registered shape.
    ///
    /// This is the only recoverable decode failure: the frame is known to be
    /// self-contained, so the caller can drop it and keep going.
    UnknownPacket { id: u32, offset: usize },

    /// A switch or union read a discriminant with no matching variant.
    UnknownDiscriminant {
        field: &'static str,
        value: i64,
        offset: usize,
    },

    /// A value cannot be written under its field's codec.
    InvalidValue {
        field: &'static str,
        reason: ValueReason,
    },

    /// The value list does not line up with the field list.
    FieldCountMismatch {
        scope: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A dependent field's source value was never recorded.
    MissingDependency {
        field: &'static str,
        depends_on: &'static str,
    },

    /// A decoded count or length exceeds the configured limit.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// The frame had bytes left after the last field.
    TrailingBytes { id: u32, remaining: usize },

    /// The tag grammar rejected an inline tag.
    Tag {
        field: &'static str,
        offset: usize,
        source: TagError,
    },

    /// An inline tag was reached without a grammar to measure it.
    TagGrammarUnavailable { field: &'static str },

    /// The message's shape is not part of the registry.
    UnregisteredShape { name: &'static str },

    /// A length-framed value did not fill its declared frame.
    FrameLength {
        field: &'static str,
        offset: usize,
        declared: usize,
        consumed: usize,
    },
}

impl CodecError {
    /// Returns `true` if decoding can continue with the next frame.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnknownPacket { .. })
    }
}

/// Specific limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    ArrayLength,
    StringLength,
    Depth,
}

/// Details for invalid value errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueReason {
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    UnsignedOutOfRange {
        codec: &'static str,
        value: u64,
    },
    SignedOutOfRange {
        codec: &'static str,
        value: i64,
    },
    /// Presence of the value disagrees with its gate.
    PresenceMismatch { gate_open: bool },
    /// The variant value does not match the dependency's discriminant.
    VariantMismatch { expected: i64, found: i64 },
    /// The variant value names a discriminant the codec does not declare.
    UnknownVariant { discriminant: i64 },
}

/// Errors raised while assembling a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
    /// Two shapes claim one identifier.
    DuplicateId {
        id: u32,
        existing: &'static str,
        duplicate: &'static str,
    },

    /// Two shapes share a name.
    DuplicateName { name: &'static str },

    /// A shape failed validation.
    InvalidShape {
        name: &'static str,
        source: SchemaError,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream(e) => write!(f, "stream error: {e}"),
            Self::UnknownPacket { id, offset } => {
                write!(f, "unknown packet id {id} (0x{id:X}) at offset {offset}")
            }
            Self::UnknownDiscriminant {
                field,
                value,
                offset,
            } => {
                write!(
                    f,
                    "unknown discriminant {value} for field '{field}' at offset {offset}"
                )
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "invalid value for field '{field}': {reason}")
            }
            Self::FieldCountMismatch {
                scope,
                expected,
                actual,
            } => {
                write!(f, "{scope}: expected {expected} fields, got {actual}")
            }
            Self::MissingDependency { field, depends_on } => {
                write!(
                    f,
                    "field '{field}' depends on '{depends_on}', which has no recorded value"
                )
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::TrailingBytes { id, remaining } => {
                write!(f, "packet {id} has {remaining} trailing bytes")
            }
            Self::Tag {
                field,
                offset,
                source,
            } => {
                write!(f, "tag in field '{field}' at offset {offset}: {source}")
            }
            Self::TagGrammarUnavailable { field } => {
                write!(f, "field '{field}' holds an inline tag but no tag grammar is set")
            }
            Self::UnregisteredShape { name } => {
                write!(f, "shape '{name}' is not registered")
            }
            Self::FrameLength {
                field,
                offset,
                declared,
                consumed,
            } => {
                write!(
                    f,
                    "field '{field}' at offset {offset} declares {declared} bytes but its value uses {consumed}"
                )
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ArrayLength => "array length",
            Self::StringLength => "string length",
            Self::Depth => "nesting depth",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for ValueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected {expected} but got {found}")
            }
            Self::UnsignedOutOfRange { codec, value } => {
                write!(f, "unsigned value {value} does not fit {codec}")
            }
            Self::SignedOutOfRange { codec, value } => {
                write!(f, "signed value {value} does not fit {codec}")
            }
            Self::PresenceMismatch { gate_open } => {
                if *gate_open {
                    write!(f, "gate is open but the value is absent")
                } else {
                    write!(f, "gate is closed but a value is present")
                }
            }
            Self::VariantMismatch { expected, found } => {
                write!(f, "dependency selects variant {expected} but value is variant {found}")
            }
            Self::UnknownVariant { discriminant } => {
                write!(f, "no variant with discriminant {discriminant}")
            }
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId {
                id,
                existing,
                duplicate,
            } => {
                write!(
                    f,
                    "packet id {id} registered for both '{existing}' and '{duplicate}'"
                )
            }
            Self::DuplicateName { name } => {
                write!(f, "shape name '{name}' registered twice")
            }
            Self::InvalidShape { name, source } => {
                write!(f, "shape '{name}' is invalid: {source}")
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Stream(e) => Some(e),
            Self::Tag { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidShape { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<StreamError> for CodecError {
    fn from(err: StreamError) -> Self {
        Self::Stream(err)
    }
}
