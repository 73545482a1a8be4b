//! Sender-ID gate: decide whether an SMS came from a bank-grade sender.
//!
//! Indian transactional SMS arrives from DLT headers shaped like
//! `VM-HDFCBK` or `AD-ICICIB-S` (two-letter operator/circle prefix, a
//! six-character header, optional one-character category suffix), or
//! from short numeric codes. Plain 10-digit numbers are people, not
//! banks, and are always rejected.

use std::sync::OnceLock;

use regex::Regex;

/// Known bank and wallet header tokens, matched case-insensitively
/// anywhere in the sender ID. Order is lookup order.
const BANK_TOKENS: &[(&str, &str)] = &[
    ("HDFC", "HDFC Bank"),
    ("ICICI", "ICICI Bank"),
    ("SBI", "State Bank of India"),
    ("AXIS", "Axis Bank"),
    ("KOTAK", "Kotak Mahindra Bank"),
    ("PNB", "Punjab National Bank"),
    ("BOB", "Bank of Baroda"),
    ("CANBNK", "Canara Bank"),
    ("UNIONB", "Union Bank of India"),
    ("IDFC", "IDFC First Bank"),
    ("INDUS", "IndusInd Bank"),
    ("YESBNK", "Yes Bank"),
    ("FEDBNK", "Federal Bank"),
    ("RBL", "RBL Bank"),
    ("AUBANK", "AU Small Finance Bank"),
    ("PAYTM", "Paytm Payments Bank"),
    ("PHONEPE", "PhonePe"),
    ("PHONPE", "PhonePe"),
    ("GPAY", "Google Pay"),
];

fn dlt_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z]{2}-(?P<core>[A-Za-z0-9]{6})(?:-[A-Za-z0-9])?$")
            .expect("invalid dlt header regex")
    })
}

/// True when the sender looks like a bank, wallet, or transactional
/// shortcode rather than a person.
pub fn is_bank_sender(sender_id: &str) -> bool {
    let sender = sender_id.trim();
    if sender.is_empty() {
        return false;
    }
    if sender.chars().all(|c| c.is_ascii_digit()) {
        // Shortcodes like 56161 are transactional; anything phone-number
        // sized is a person and never a bank.
        return (4..=8).contains(&sender.len());
    }
    if bank_name(sender).is_some() {
        return true;
    }
    dlt_header_re().is_match(sender)
}

/// Strip the DLT route prefix/suffix, leaving the header itself.
///
/// `"VM-HDFCBK"` and `"AD-HDFCBK-S"` both normalize to `"HDFCBK"`;
/// anything that is not DLT-shaped is just uppercased.
pub fn normalize_sender(sender_id: &str) -> String {
    let sender = sender_id.trim();
    if let Some(caps) = dlt_header_re().captures(sender) {
        return caps["core"].to_ascii_uppercase();
    }
    sender.to_ascii_uppercase()
}

/// Display name of the bank behind a sender ID, when recognized.
pub fn bank_name(sender_id: &str) -> Option<&'static str> {
    let upper = sender_id.trim().to_ascii_uppercase();
    BANK_TOKENS
        .iter()
        .find(|(token, _)| upper.contains(token))
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dlt_headers_pass_the_gate() {
        assert!(is_bank_sender("VM-HDFCBK"));
        assert!(is_bank_sender("AD-ICICIB-S"));
        assert!(is_bank_sender("JX-SBIINB"));
        // Unknown but DLT-shaped still passes; body checks do the rest.
        assert!(is_bank_sender("BZ-QRM0X1"));
    }

    #[test]
    fn test_bare_tokens_and_shortcodes_pass() {
        assert!(is_bank_sender("HDFCBK"));
        assert!(is_bank_sender("56161"));
        assert!(is_bank_sender("9223 "));
    }

    #[test]
    fn test_people_and_noise_fail() {
        assert!(!is_bank_sender("9876543210"));
        assert!(!is_bank_sender("+919876543210"));
        assert!(!is_bank_sender("Amma"));
        assert!(!is_bank_sender(""));
        assert!(!is_bank_sender("123"));
    }

    #[test]
    fn test_normalize_strips_dlt_route() {
        assert_eq!(normalize_sender("VM-HDFCBK"), "HDFCBK");
        assert_eq!(normalize_sender("ad-icicib-s"), "ICICIB");
        assert_eq!(normalize_sender("56161"), "56161");
        assert_eq!(normalize_sender("Amma"), "AMMA");
    }

    #[test]
    fn test_bank_name_lookup() {
        assert_eq!(bank_name("VM-HDFCBK"), Some("HDFC Bank"));
        assert_eq!(bank_name("JX-SBIINB"), Some("State Bank of India"));
        assert_eq!(bank_name("AX-PHONPE"), Some("PhonePe"));
        assert_eq!(bank_name("BZ-QRM0X1"), None);
    }
}
