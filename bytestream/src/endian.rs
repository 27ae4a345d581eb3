//! Byte order selection for fixed-width primitives.

/// Byte order of a fixed-width field.
///
/// Most Bedrock fields are little-endian, but a handful (protocol versions,
/// play status) are big-endian, so the order is chosen per field rather than
/// per stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Endianness {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

impl Endianness {
    /// Returns `true` for big-endian.
    #[must_use]
    pub const fn is_big(self) -> bool {
        matches!(self, Self::Big)
    }
}
