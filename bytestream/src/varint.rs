//! Variable-width integer helpers.
//!
//! Unsigned varints carry 7 data bits per byte, least significant group
//! first, with the high bit set on every byte except the last. Signed values
//! are mapped through zigzag before hitting the unsigned encoding.

/// Maximum number of groups in a 32-bit varint.
pub const MAX_VAR_U32_BYTES: usize = 5;

/// Maximum number of groups in a 64-bit varint.
pub const MAX_VAR_U64_BYTES: usize = 10;

/// Maps a signed 32-bit integer onto the unsigned range.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn zigzag_encode_32(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

/// Inverse of [`zigzag_encode_32`].
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub const fn zigzag_decode_32(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

/// Maps a signed 64-bit integer onto the unsigned range.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn zigzag_encode_64(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode_64`].
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub const fn zigzag_decode_64(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Number of bytes needed to encode `value` as a varint.
#[must_use]
pub const fn var_u32_len(value: u32) -> usize {
    var_u64_len(value as u64)
}

/// Number of bytes needed to encode `value` as a varint.
#[must_use]
pub const fn var_u64_len(mut value: u64) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zigzag_small_values() {
        assert_eq!(zigzag_encode_32(0), 0);
        assert_eq!(zigzag_encode_32(-1), 1);
        assert_eq!(zigzag_encode_32(1), 2);
        assert_eq!(zigzag_encode_32(-2), 3);
        assert_eq!(zigzag_encode_64(-1), 1);
        assert_eq!(zigzag_encode_64(1), 2);
    }

    #[test]
    fn zigzag_extremes_32() {
        assert_eq!(zigzag_encode_32(i32::MAX), u32::MAX - 1);
        assert_eq!(zigzag_encode_32(i32::MIN), u32::MAX);
        assert_eq!(zigzag_decode_32(u32::MAX), i32::MIN);
        assert_eq!(zigzag_decode_32(u32::MAX - 1), i32::MAX);
    }

    #[test]
    fn zigzag_extremes_64() {
        assert_eq!(zigzag_encode_64(i64::MAX), u64::MAX - 1);
        assert_eq!(zigzag_encode_64(i64::MIN), u64::MAX);
        assert_eq!(zigzag_decode_64(u64::MAX), i64::MIN);
        assert_eq!(zigzag_decode_64(u64::MAX - 1), i64::MAX);
    }

    #[test]
    fn varint_lengths() {
        assert_eq!(var_u32_len(0), 1);
        assert_eq!(var_u32_len(127), 1);
        assert_eq!(var_u32_len(128), 2);
        assert_eq!(var_u32_len(16_383), 2);
        assert_eq!(var_u32_len(16_384), 3);
        assert_eq!(var_u32_len(u32::MAX), MAX_VAR_U32_BYTES);
        assert_eq!(var_u64_len(u64::MAX), MAX_VAR_U64_BYTES);
    }
}
