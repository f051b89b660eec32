//! Lenient integer literal recognition.

/// Parse `s` as a decimal integer literal, or return `None`.
///
/// Accepted: surrounding whitespace, one optional `+`/`-` sign, ASCII
/// digits, and single `_` separators between digits (`1_000`). Values
/// outside the `i64` range are rejected like any other bad token, and so
/// are non-ASCII decimal digits such as fullwidth `１`.
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, body) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let bytes = body.as_bytes();
    let first = *bytes.first()?;
    let last = *bytes.last()?;
    if !first.is_ascii_digit() || !last.is_ascii_digit() {
        return None;
    }
    if body.contains("__") || !bytes.iter().all(|b| b.is_ascii_digit() || *b == b'_') {
        return None;
    }

    let digits: String = body.chars().filter(|c| *c != '_').collect();
    if negative {
        format!("-{digits}").parse().ok()
    } else {
        digits.parse().ok()
    }
}

/// True if `s` would be accepted by [`parse_int`].
pub fn is_int(s: &str) -> bool {
    parse_int(s).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_signed() {
        assert_eq!(parse_int("5"), Some(5));
        assert_eq!(parse_int("-12"), Some(-12));
        assert_eq!(parse_int("+7"), Some(7));
        assert_eq!(parse_int("007"), Some(7));
        assert_eq!(parse_int("-0"), Some(0));
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(parse_int("  42\n"), Some(42));
    }

    #[test]
    fn underscore_separators() {
        assert_eq!(parse_int("1_000"), Some(1000));
        assert_eq!(parse_int("-1_2_3"), Some(-123));
        assert_eq!(parse_int("1__000"), None);
        assert_eq!(parse_int("_1"), None);
        assert_eq!(parse_int("1_"), None);
        assert_eq!(parse_int("+_1"), None);
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", " ", "-", "+", "apple", "5a", "1.5", "0x10", "--3", "+-3"] {
            assert_eq!(parse_int(bad), None, "{bad:?} should not parse");
            assert!(!is_int(bad));
        }
    }

    #[test]
    fn non_ascii_digits_are_rejected() {
        // Fullwidth, Arabic-Indic and Devanagari digits.
        for bad in ["１", "１２", "٣", "५", "1١"] {
            assert_eq!(parse_int(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn range_limits() {
        assert_eq!(parse_int("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_int("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(parse_int("9223372036854775808"), None);
    }
}
