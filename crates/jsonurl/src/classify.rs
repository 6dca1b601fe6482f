//! The character classifier: two fixed ASCII sets drive the lexer.
//!
//! Kept as plain `match` predicates rather than a precomputed bitset table:
//! the input alphabet is ASCII-only and the branches compile to simple
//! range comparisons.

/// Structural characters: open/close composite and the list/mapping
/// separators.
pub(crate) const OPEN: u8 = b'(';
pub(crate) const CLOSE: u8 = b')';
pub(crate) const COMMA: u8 = b',';
pub(crate) const COLON: u8 = b':';

/// The non-AQF quoting sigil.
pub(crate) const QUOTE: u8 = b'\'';
/// The AQF escape sigil.
pub(crate) const BANG: u8 = b'!';

/// `true` for a byte in the *unencoded set*: `A-Z`, `a-z`, `0-9`, and
/// `-._~!$*/;?@`. These may appear literally in a bare atom without
/// percent-encoding.
pub(crate) fn is_unencoded(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'-' | b'.' | b'_' | b'~' | b'!' | b'$' | b'*' | b'/' | b';' | b'?' | b'@'
        )
}

/// `true` for one of the four structural characters `(`, `)`, `,`, `:`.
pub(crate) fn is_structural(b: u8) -> bool {
    matches!(b, OPEN | CLOSE | COMMA | COLON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unencoded_set_matches_spec() {
        for b in b'a'..=b'z' {
            assert!(is_unencoded(b));
        }
        for b in b'A'..=b'Z' {
            assert!(is_unencoded(b));
        }
        for b in b'0'..=b'9' {
            assert!(is_unencoded(b));
        }
        for b in b"-._~!$*/;?@" {
            assert!(is_unencoded(*b));
        }
    }

    #[test]
    fn illegal_bytes_are_rejected() {
        for b in b"&=[]{}^|#\\`" {
            assert!(!is_unencoded(*b));
            assert!(!is_structural(*b));
        }
    }

    #[test]
    fn structural_set_matches_spec() {
        for b in b"(),:" {
            assert!(is_structural(*b));
            assert!(!is_unencoded(*b));
        }
    }
}
