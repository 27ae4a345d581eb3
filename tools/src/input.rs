//! Frames given as text on the command line.

use anyhow::{Context, Result};

/// Parses hex digits, ignoring whitespace, `:` separators and a `0x` prefix.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    let digits: String = text
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && *c != ':')
        .collect();
    hex::decode(&digits).with_context(|| format!("invalid hex input {digits:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_separators() {
        assert_eq!(parse_hex("0x0a 01:ff").unwrap(), vec![0x0A, 0x01, 0xFF]);
        assert_eq!(parse_hex("0A\n01").unwrap(), vec![0x0A, 0x01]);
        assert_eq!(parse_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn parse_rejects_bad_input() {
        let odd = parse_hex("abc").unwrap_err();
        assert!(odd.to_string().contains("invalid hex input"));
        assert!(matches!(
            odd.downcast_ref::<hex::FromHexError>(),
            Some(hex::FromHexError::OddLength)
        ));

        let bad = parse_hex("zz").unwrap_err();
        assert!(matches!(
            bad.downcast_ref::<hex::FromHexError>(),
            Some(hex::FromHexError::InvalidHexCharacter { c: 'z', index: 0 })
        ));
    }
}
