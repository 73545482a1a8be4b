//! Shared text helpers for keyword matching and amount normalization.
//!
//! Both the SMS parser and the classifier match vocabulary against
//! normalized text, and both parse currency figures; keeping the helpers
//! here avoids duplicating them without introducing any shared state.

/// Lowercase and collapse runs of whitespace into single spaces.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Byte offset of the first occurrence of `needle` in `haystack` that
/// is bounded by non-alphanumeric characters or the string edges. Plain
/// `find` would let "paid" match inside "prepaid".
pub fn find_word(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(needle) {
        let start = from + pos;
        let end = start + needle.len();
        let left_ok = start == 0
            || haystack[..start]
                .chars()
                .next_back()
                .is_some_and(|c| !c.is_alphanumeric());
        let right_ok = end == haystack.len()
            || haystack[end..]
                .chars()
                .next()
                .is_some_and(|c| !c.is_alphanumeric());
        if left_ok && right_ok {
            return Some(start);
        }
        from = end;
    }
    None
}

/// True if `needle` occurs word-bounded in `haystack`.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    find_word(haystack, needle).is_some()
}

/// True if any keyword occurs word-bounded in `haystack`.
/// Expects `haystack` already normalized via [`normalize`].
pub fn contains_any_word(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| contains_word(haystack, kw))
}

/// Parse a decimal written with comma thousands separators and a period
/// decimal point, the notation Indian banks use ("25,000", "12,340.50",
/// lakh grouping "1,23,456.78"). Returns None for anything else; this
/// parser never accepts signs, so the result is always non-negative.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() || !cleaned.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    if !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    if cleaned.matches('.').count() > 1 {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Rs.500   debited\nfrom A/c "), "rs.500 debited from a/c");
    }

    #[test]
    fn test_contains_word_boundaries() {
        assert!(contains_word("you have paid rs.500", "paid"));
        assert!(!contains_word("recharge your prepaid plan", "paid"));
        assert!(contains_word("payment of rs.500 done", "payment of"));
        assert!(contains_word("otp", "otp"));
        assert!(!contains_word("", "otp"));
    }

    #[test]
    fn test_find_word_offsets() {
        assert_eq!(find_word("pay on delivery", "on"), Some(4));
        // Skips the embedded hit, lands on the standalone word.
        assert_eq!(find_word("monsoon on sale", "on"), Some(8));
        assert_eq!(find_word("monsoon", "on"), None);
    }

    #[test]
    fn test_contains_any_word() {
        assert!(contains_any_word("rs.500 debited from a/c", &["credited", "debited"]));
        assert!(!contains_any_word("your statement is ready", &["credited", "debited"]));
    }

    #[test]
    fn test_parse_decimal_conventions() {
        assert_eq!(parse_decimal("500"), Some(500.0));
        assert_eq!(parse_decimal("500.00"), Some(500.0));
        assert_eq!(parse_decimal("25,000"), Some(25000.0));
        assert_eq!(parse_decimal("12,340.50"), Some(12340.50));
        // Indian lakh grouping
        assert_eq!(parse_decimal("1,23,456.78"), Some(123456.78));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("-500"), None);
        assert_eq!(parse_decimal("12.34.56"), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal(".50"), None);
    }
}
