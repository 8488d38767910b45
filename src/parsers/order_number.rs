//! Order number extraction. Order numbers have the fixed form `ORD-YYYY-NNN`.

use regex::Regex;
use std::sync::LazyLock;

static ORDER_NUMBER_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)ORD-\d{4}-\d{3}").ok());

static EXACT_ORDER_NUMBER_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^ORD-\d{4}-\d{3}$").ok());

/// Returns the first order number in `text`, upper-cased.
///
/// ```
/// use supplier_desk::parsers::extract_order_number;
/// assert_eq!(
///     extract_order_number("order ord-2024-001 status").as_deref(),
///     Some("ORD-2024-001")
/// );
/// ```
#[must_use]
pub fn extract_order_number(text: &str) -> Option<String> {
    ORDER_NUMBER_RE
        .as_ref()?
        .find(text)
        .map(|m| m.as_str().to_uppercase())
}

/// True if `number` is exactly a canonical (upper-case) order number.
#[must_use]
pub fn is_valid_order_number(number: &str) -> bool {
    EXACT_ORDER_NUMBER_RE
        .as_ref()
        .is_some_and(|re| re.is_match(number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_order_number() {
        assert_eq!(
            extract_order_number("order ORD-2024-001 status").as_deref(),
            Some("ORD-2024-001")
        );
        assert_eq!(
            extract_order_number("מה הסטטוס של ord-2025-017?").as_deref(),
            Some("ORD-2025-017")
        );
        assert_eq!(extract_order_number("order 2024-001"), None);
        assert_eq!(extract_order_number("ORD-24-001"), None);
    }

    #[test]
    fn test_first_order_number_wins() {
        assert_eq!(
            extract_order_number("ORD-2024-002 or ORD-2024-003").as_deref(),
            Some("ORD-2024-002")
        );
    }

    #[test]
    fn test_is_valid_order_number() {
        assert!(is_valid_order_number("ORD-2025-001"));
        assert!(!is_valid_order_number("ord-2025-001"));
        assert!(!is_valid_order_number("ORD-2025-0011"));
        assert!(!is_valid_order_number("x ORD-2025-001"));
    }
}
