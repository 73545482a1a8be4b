//! Keyword evidence tables for transaction direction and message filtering.
//!
//! All lookups run against normalized text (lowercase, collapsed
//! whitespace) with word-boundary matching, so "paid" never fires
//! inside "prepaid". Table order is precedence order.

use kharcha_core::text::contains_any_word;
use kharcha_core::Direction;

/// How firmly a keyword pins the money direction. Strong verbs describe
/// a completed movement ("debited"); weak cues are contextual nouns
/// ("debit") that promos also use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    Strong,
    Weak,
}

/// Completed-action debit verbs, plus the acknowledgment phrasing where
/// the bank is the receiving side ("received your payment" means the
/// user paid).
const DEBIT_STRONG: &[&str] = &[
    "debited",
    "withdrawn",
    "spent",
    "paid",
    "deducted",
    "purchased",
    "charged",
    "sent",
    "received your payment",
];

/// Contextual debit cues.
const DEBIT_WEAK: &[&str] = &["debit", "purchase", "payment of"];

/// Completed-action credit verbs.
const CREDIT_STRONG: &[&str] = &[
    "credited",
    "received",
    "deposited",
    "refunded",
    "reversed",
];

/// Contextual credit cues.
const CREDIT_WEAK: &[&str] = &["credit", "refund", "cashback", "added", "reversal"];

/// Phrases that mark one-time-password messages.
const OTP_MARKERS: &[&str] = &[
    "otp",
    "one time password",
    "verification code",
    "do not share",
];

/// Single words common in promotional blasts.
const PROMO_WORDS: &[&str] = &[
    "offer",
    "discount",
    "win",
    "congratulations",
    "voucher",
    "coupon",
];

/// Promo phrases that word-boundary matching cannot express ("% off"
/// starts mid-token), checked with plain substring containment.
const PROMO_PHRASES: &[&str] = &["% off", "use code", "t&c"];

/// Determine transaction direction from keyword evidence.
///
/// Strong verbs outrank weak cues, and debit outranks credit at equal
/// strength: a message carrying both vocabularies ("payment received,
/// amount debited") lands on debit, since a missed expense costs the
/// user more than a misfiled credit.
pub fn detect_direction(text: &str) -> Option<(Direction, Strength)> {
    if contains_any_word(text, DEBIT_STRONG) {
        return Some((Direction::Debit, Strength::Strong));
    }
    if contains_any_word(text, CREDIT_STRONG) {
        return Some((Direction::Credit, Strength::Strong));
    }
    if contains_any_word(text, DEBIT_WEAK) {
        return Some((Direction::Debit, Strength::Weak));
    }
    if contains_any_word(text, CREDIT_WEAK) {
        return Some((Direction::Credit, Strength::Weak));
    }
    None
}

/// True when the message carries one-time-password vocabulary.
pub fn has_otp_marker(text: &str) -> bool {
    contains_any_word(text, OTP_MARKERS)
}

/// True when the message carries promotional vocabulary.
pub fn has_promo_marker(text: &str) -> bool {
    if contains_any_word(text, PROMO_WORDS) {
        return true;
    }
    PROMO_PHRASES.iter().any(|phrase| text.contains(phrase))
}
