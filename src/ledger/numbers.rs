use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse the longest numeric prefix of `s` (optional sign, digits, at most
/// one `.`). Trailing text such as a currency suffix is ignored.
pub fn leading_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }

    let candidate = s[..end].trim_end_matches('.');
    Decimal::from_str(candidate.trim_start_matches('+')).ok()
}

/// Quantity text (`totalAmount`, `payableAmount`) to a number, 0 when unreadable.
pub fn parse_quantity(s: &str) -> Decimal {
    leading_decimal(s).unwrap_or(Decimal::ZERO)
}

/// Price text like `"12,345 TL"` to a number, 0 for the `"-"` placeholder or
/// anything unreadable. Only digits, `.` and `,` are kept, and `,` is read
/// as the decimal separator.
pub fn parse_price(s: &str) -> Decimal {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    leading_decimal(&cleaned).unwrap_or(Decimal::ZERO)
}

/// True if `s` is a plain non-negative number (used to validate quantity input).
pub fn is_non_negative_number(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_digit() || c == '.')
        && s.chars().filter(|c| *c == '.').count() <= 1
        && s.chars().any(|c| c.is_ascii_digit())
        && Decimal::from_str(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_decimal_ignores_suffix() {
        assert_eq!(leading_decimal("10 TL"), Some(Decimal::from(10)));
        assert_eq!(leading_decimal("  2.5abc"), Some(Decimal::new(25, 1)));
        assert_eq!(leading_decimal("-3"), Some(Decimal::from(-3)));
        assert_eq!(leading_decimal("1.234.56"), Some(Decimal::new(1234, 3)));
        assert_eq!(leading_decimal("7."), Some(Decimal::from(7)));
    }

    #[test]
    fn test_leading_decimal_rejects_non_numbers() {
        assert_eq!(leading_decimal(""), None);
        assert_eq!(leading_decimal("-"), None);
        assert_eq!(leading_decimal("abc"), None);
        assert_eq!(leading_decimal("."), None);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("10 TL"), Decimal::from(10));
        assert_eq!(parse_price("3,141592 TL"), Decimal::new(3_141_592, 6));
        assert_eq!(parse_price("-"), Decimal::ZERO);
        assert_eq!(parse_price(""), Decimal::ZERO);
        // Thousands separators are not understood: the first number wins.
        assert_eq!(parse_price("1.234,56 TL"), Decimal::new(1234, 3));
    }

    #[test]
    fn test_parse_quantity_defaults_to_zero() {
        assert_eq!(parse_quantity("150"), Decimal::from(150));
        assert_eq!(parse_quantity("-"), Decimal::ZERO);
        assert_eq!(parse_quantity("n/a"), Decimal::ZERO);
    }

    #[test]
    fn test_is_non_negative_number() {
        assert!(is_non_negative_number("0"));
        assert!(is_non_negative_number(" 12.5 "));
        assert!(!is_non_negative_number("-1"));
        assert!(!is_non_negative_number("1.2.3"));
        assert!(!is_non_negative_number("-"));
        assert!(!is_non_negative_number(""));
    }
}
