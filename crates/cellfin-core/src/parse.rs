//! # Lenient Number Parsing
//!
//! Form fields hand us whatever the user typed, mid-edit. Both validation and
//! the live preview read that text with the same lenient rule:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Text            parse_leading_number      best_effort_number           │
//! │  ──────────────  ────────────────────────  ────────────────────────     │
//! │  "100"           Some(100.0)               100.0                        │
//! │  "  12.5abc"     Some(12.5)                12.5                         │
//! │  "1e3"           Some(1000.0)              1000.0                       │
//! │  ".5"            Some(0.5)                 0.5                          │
//! │  "-5"            Some(-5.0)                0.0   (clamped)              │
//! │  "Infinity"      Some(inf)                 0.0   (clamped)              │
//! │  ""  / "abc"     None                      0.0                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The longest numeric prefix wins; trailing garbage is ignored. Validation
//! decides whether the value is acceptable, the preview just needs a number.

/// Reads the longest numeric prefix of `text` after leading whitespace.
///
/// Accepts an optional sign, integer and/or fractional digits, an optional
/// exponent, and the literal `Infinity`. Returns `None` when no digits are
/// found.
///
/// ## Example
/// ```rust
/// use cellfin_core::parse::parse_leading_number;
///
/// assert_eq!(parse_leading_number("123.00"), Some(123.0));
/// assert_eq!(parse_leading_number("42 USD"), Some(42.0));
/// assert_eq!(parse_leading_number("USD 42"), None);
/// ```
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut cursor = frac_start;
        while cursor < len && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        frac_digits = cursor - frac_start;
        if int_digits > 0 || frac_digits > 0 {
            end = cursor;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut cursor = end + 1;
        if cursor < len && matches!(bytes[cursor], b'+' | b'-') {
            cursor += 1;
        }
        let exp_start = cursor;
        while cursor < len && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > exp_start {
            end = cursor;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Reads a number for the live preview, defaulting to zero.
///
/// Anything that would break the calculator's input contract collapses to
/// `0.0`: unparseable text, zero, negatives and infinities.
///
/// ## Example
/// ```rust
/// use cellfin_core::parse::best_effort_number;
///
/// assert_eq!(best_effort_number("123"), 123.0);
/// assert_eq!(best_effort_number(""), 0.0);
/// assert_eq!(best_effort_number("-5"), 0.0);
/// ```
pub fn best_effort_number(text: &str) -> f64 {
    match parse_leading_number(text) {
        Some(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_leading_number("100"), Some(100.0));
        assert_eq!(parse_leading_number("0.01"), Some(0.01));
        assert_eq!(parse_leading_number("123.00"), Some(123.0));
        assert_eq!(parse_leading_number("+7"), Some(7.0));
        assert_eq!(parse_leading_number("-5"), Some(-5.0));
    }

    #[test]
    fn test_partial_decimals() {
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("5."), Some(5.0));
        assert_eq!(parse_leading_number("-.25"), Some(-0.25));
        assert_eq!(parse_leading_number("."), None);
        assert_eq!(parse_leading_number("-"), None);
    }

    #[test]
    fn test_trailing_garbage_ignored() {
        assert_eq!(parse_leading_number("12abc"), Some(12.0));
        assert_eq!(parse_leading_number("1.2.3"), Some(1.2));
        assert_eq!(parse_leading_number("1,000"), Some(1.0));
        assert_eq!(parse_leading_number("  42  "), Some(42.0));
    }

    #[test]
    fn test_exponents() {
        assert_eq!(parse_leading_number("1e3"), Some(1000.0));
        assert_eq!(parse_leading_number("2.5E-1"), Some(0.25));
        // Dangling exponent marker is not part of the number
        assert_eq!(parse_leading_number("7e"), Some(7.0));
        assert_eq!(parse_leading_number("7e+"), Some(7.0));
    }

    #[test]
    fn test_infinity() {
        assert_eq!(parse_leading_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_leading_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_leading_number("inf"), None);
    }

    #[test]
    fn test_not_numbers() {
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("   "), None);
        assert_eq!(parse_leading_number("abc"), None);
        assert_eq!(parse_leading_number("NaN"), None);
        assert_eq!(parse_leading_number("$5"), None);
    }

    #[test]
    fn test_best_effort_defaults_to_zero() {
        assert_eq!(best_effort_number("100"), 100.0);
        assert_eq!(best_effort_number("12abc"), 12.0);
        assert_eq!(best_effort_number(""), 0.0);
        assert_eq!(best_effort_number("abc"), 0.0);
        assert_eq!(best_effort_number("0"), 0.0);
        assert_eq!(best_effort_number("-5"), 0.0);
        assert_eq!(best_effort_number("Infinity"), 0.0);
        assert!(best_effort_number("-0").is_sign_positive());
    }
}
