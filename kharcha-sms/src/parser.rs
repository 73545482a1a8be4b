//! The transaction parser: free-text bank SMS in, structured
//! transaction out.
//!
//! Expected shape of input:
//!   "Rs.500.00 debited from A/c XX1234 on 04-Feb-26 at Starbucks. Avl bal Rs.12,340.50"
//!
//! Everything here is pure and single-message: no I/O, no state across
//! calls, no cross-message inference. Unparseable text yields `None`,
//! never an error; low-certainty extractions are returned with a low
//! confidence score instead of being suppressed, so a human reviewer
//! sees them.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use kharcha_core::text::{find_word, normalize, parse_decimal};
use kharcha_core::ParsedTransaction;

use crate::keywords::{self, Strength};
use crate::sender;

/// Confidence points, in hundredths. Summed as integers and divided
/// once at the end, so equal extractions score bit-identically.
const BASE_POINTS: u32 = 30;
const STRONG_VERB_POINTS: u32 = 20;
const WEAK_VERB_POINTS: u32 = 5;
const MARKED_AMOUNT_POINTS: u32 = 15;
const MERCHANT_POINTS: u32 = 15;
const ACCOUNT_POINTS: u32 = 10;
const BALANCE_POINTS: u32 = 10;

/// Longest gap, in bytes, between a balance phrase and the figure it
/// claims ("Avl bal ... Rs.12,340.50").
const BALANCE_CLAIM_WINDOW: usize = 24;

/// Longest merchant name kept, in characters.
const MERCHANT_MAX_CHARS: usize = 40;

/// Candidate prefixes after a delimiter that name an account, an
/// instrument, or boilerplate rather than a payee. Rejecting the
/// candidate moves the scan to the next delimiter occurrence.
const NON_MERCHANT_PREFIXES: &[&str] = &[
    "a/c",
    "account",
    "acct",
    "ac ",
    "card",
    "bank",
    "atm",
    "pos",
    "upi",
    "imps",
    "neft",
    "rtgs",
    "xx",
    "rs.",
    "rs ",
    "inr",
    "order",
    "txn",
    "transaction",
    "ref",
    "payment",
    "purchase",
    "amount",
    "amt",
    "info",
    "details",
    "more",
];

/// Words that end a merchant name when they follow it.
const MERCHANT_TERMINATOR_WORDS: &[&str] = &[
    "on", "at", "to", "for", "from", "via", "towards", "using", "thru", "through", "ref", "utr",
    "rrn", "upi", "txn", "rs", "inr", "avl", "avail", "bal", "balance", "info", "dated", "not",
];

/// A candidate money figure found in the body.
#[derive(Debug, Clone, Copy)]
struct MoneyToken {
    value: f64,
    start: usize,
    end: usize,
    /// Carried an explicit currency marker (₹ / Rs / INR / "/-").
    marked: bool,
}

fn prefix_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:₹|\brs\.?|\binr)\s*(?P<amt>[0-9][0-9,]*(?:\.[0-9]{1,2})?)")
            .expect("invalid prefix amount regex")
    })
}

fn suffix_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?P<amt>[0-9][0-9,]*(?:\.[0-9]{1,2})?)\s*(?:rs\b|inr\b|₹|/-)")
            .expect("invalid suffix amount regex")
    })
}

fn labeled_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?:amt|amount)\s*[:.]?\s*(?:of\s+)?(?P<amt>[0-9][0-9,]*(?:\.[0-9]{1,2})?)")
            .expect("invalid labeled amount regex")
    })
}

fn balance_phrase_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"\b(?:avl\.?|avail(?:able)?|a/?c|acct|account|net|total|current)\s*bal(?:ance)?\b",
            r"|\bbal(?:ance)?\s*(?::|is\b)"
        ))
        .expect("invalid balance phrase regex")
    })
}

fn merchant_delimiter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?:towards|at|to|via|for|from|in favou?r of)\s+")
            .expect("invalid merchant delimiter regex")
    })
}

fn date_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b\d{1,2}[-/][a-z0-9]{2,3}[-/]\d{2,4}\b|\b\d{4}-\d{2}-\d{2}\b")
            .expect("invalid date token regex")
    })
}

fn account_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"\b(?:a/c|account|acct|ac|card)\b",
            r"(?:\s*(?:no|number)\.?)?",
            r"\s*(?:ending(?:\s+in)?\s*|xx+|x+|\*+|#+)?",
            r"\s*(?P<digits>[0-9]{3,18})"
        ))
        .expect("invalid account regex")
    })
}

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"\b(?:ref(?:erence)?|utr|rrn|txn|transaction)",
            r"(?:\s*(?:no|num|number|id))?",
            r"\s*[:.#-]?\s*",
            r"(?P<ref>[a-z0-9]{6,22})\b"
        ))
        .expect("invalid reference regex")
    })
}

/// Fast gate: does this look like a bank transaction notification?
///
/// False positives are acceptable, parse still returns None for them.
/// False negatives silently drop a real transaction, which is the
/// costly failure, so the vocabulary leans broad.
pub fn can_parse(sender_id: &str, body: &str) -> bool {
    if !sender::is_bank_sender(sender_id) {
        return false;
    }
    let normalized = normalize(body);
    let Some((_, strength)) = keywords::detect_direction(&normalized) else {
        return false;
    };
    // OTP and promo blasts quote numbers freely. Only a completed-action
    // verb overrides the marker.
    if strength != Strength::Strong
        && (keywords::has_otp_marker(&normalized) || keywords::has_promo_marker(&normalized))
    {
        return false;
    }
    !collect_money_tokens(&body.to_ascii_lowercase()).is_empty()
}

/// Extract a structured transaction from a bank SMS.
///
/// Returns None when the gate fails, when no strictly positive currency
/// amount can be found, or when every figure in the message is a quoted
/// balance. On success `sms_id`, `sender_id`, and `timestamp` equal the
/// arguments unchanged.
pub fn parse(
    sender_id: &str,
    body: &str,
    sms_id: &str,
    timestamp: DateTime<Utc>,
) -> Option<ParsedTransaction> {
    // Callers gate on can_parse already; re-checking keeps parse safe
    // when they do not.
    if !can_parse(sender_id, body) {
        return None;
    }
    let lower = body.to_ascii_lowercase();
    let normalized = normalize(body);
    let (direction, strength) = keywords::detect_direction(&normalized)?;

    let tokens = collect_money_tokens(&lower);
    let (amount, balance) = split_amount_and_balance(&lower, &tokens);
    let amount = amount?;

    let merchant = extract_merchant(body, &lower);
    let account_suffix = extract_account(&lower);
    let reference = extract_reference(body, &lower);

    let mut points = BASE_POINTS;
    points += match strength {
        Strength::Strong => STRONG_VERB_POINTS,
        Strength::Weak => WEAK_VERB_POINTS,
    };
    if amount.marked {
        points += MARKED_AMOUNT_POINTS;
    }
    if merchant.is_some() {
        points += MERCHANT_POINTS;
    }
    if account_suffix.is_some() {
        points += ACCOUNT_POINTS;
    }
    if balance.is_some() {
        points += BALANCE_POINTS;
    }
    let confidence = f64::from(points.min(100)) / 100.0;

    Some(ParsedTransaction {
        sms_id: sms_id.to_string(),
        sender_id: sender_id.to_string(),
        timestamp,
        direction,
        amount: amount.value,
        merchant,
        account_suffix,
        balance,
        reference,
        confidence,
    })
}

/// Scan for money figures. The body is lowered with byte offsets intact
/// (ASCII lowering), so token spans index the original text too.
fn collect_money_tokens(lower: &str) -> Vec<MoneyToken> {
    let mut raw = Vec::new();
    push_tokens(prefix_amount_re(), lower, true, &mut raw);
    push_tokens(suffix_amount_re(), lower, true, &mut raw);
    push_tokens(labeled_amount_re(), lower, false, &mut raw);

    // Overlapping reads of the same digits: prefer the currency-marked
    // one, then the earlier one.
    raw.sort_by_key(|t| (!t.marked, t.start));
    let mut kept: Vec<MoneyToken> = Vec::new();
    for tok in raw {
        if kept.iter().any(|k| tok.start < k.end && k.start < tok.end) {
            continue;
        }
        kept.push(tok);
    }
    kept.sort_by_key(|t| t.start);
    kept
}

fn push_tokens(re: &Regex, lower: &str, marked: bool, out: &mut Vec<MoneyToken>) {
    for caps in re.captures_iter(lower) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(amt) = caps.name("amt") else { continue };
        let Some(value) = parse_decimal(amt.as_str()) else {
            continue;
        };
        if value <= 0.0 {
            continue;
        }
        out.push(MoneyToken {
            value,
            start: whole.start(),
            end: whole.end(),
            marked,
        });
    }
}

/// Let balance phrases claim the figure that follows them, then pick
/// the first unclaimed figure as the transaction amount. A message
/// whose every figure is a balance has no transaction amount.
fn split_amount_and_balance(
    lower: &str,
    tokens: &[MoneyToken],
) -> (Option<MoneyToken>, Option<f64>) {
    let mut claimed = vec![false; tokens.len()];
    let mut balance = None;
    for phrase in balance_phrase_re().find_iter(lower) {
        let mut nearest: Option<usize> = None;
        for (i, tok) in tokens.iter().enumerate() {
            if claimed[i] || tok.start < phrase.end() {
                continue;
            }
            if tok.start - phrase.end() > BALANCE_CLAIM_WINDOW {
                continue;
            }
            if nearest.is_none_or(|n| tok.start < tokens[n].start) {
                nearest = Some(i);
            }
        }
        if let Some(i) = nearest {
            claimed[i] = true;
            if balance.is_none() {
                balance = Some(tokens[i].value);
            }
        }
    }
    let amount = tokens
        .iter()
        .zip(claimed.iter())
        .find(|(_, claimed)| !**claimed)
        .map(|(tok, _)| *tok);
    (amount, balance)
}

/// Walk delimiter phrases left to right and return the first candidate
/// that survives the blocklist and cleanup. Casing comes from the
/// original body, not the lowered scan copy.
fn extract_merchant(body: &str, lower: &str) -> Option<String> {
    for m in merchant_delimiter_re().find_iter(lower) {
        if let Some(merchant) = merchant_after(body, lower, m.end()) {
            return Some(merchant);
        }
    }
    None
}

fn merchant_after(body: &str, lower: &str, delim_end: usize) -> Option<String> {
    let mut begin = delim_end;
    // "to your account ..." names the user's own account, never a payee.
    if lower[begin..].starts_with("your ") {
        begin += "your ".len();
    }
    if NON_MERCHANT_PREFIXES
        .iter()
        .any(|p| lower[begin..].starts_with(p))
    {
        return None;
    }
    if lower[begin..].starts_with("vpa ") {
        begin += "vpa ".len();
    }
    let rest = &lower[begin..];
    if rest.starts_with(|c: char| c.is_ascii_digit() || c == '₹') {
        return None;
    }

    let mut cut = rest.len();
    for (i, c) in rest.char_indices() {
        if matches!(c, '.' | ',' | ';' | '!' | '?' | '\n' | '(' | ')') {
            cut = i;
            break;
        }
    }
    if let Some(i) = rest.find(" - ") {
        cut = cut.min(i);
    }
    if let Some(i) = rest.find('₹') {
        cut = cut.min(i);
    }
    for word in MERCHANT_TERMINATOR_WORDS {
        if let Some(i) = find_word(rest, word) {
            cut = cut.min(i);
        }
    }
    if let Some(m) = date_token_re().find(rest) {
        cut = cut.min(m.start());
    }

    let mut name = &rest[..cut];
    // UPI handles: keep the part before the bank suffix.
    if let Some(i) = name.find('@') {
        name = &name[..i];
    }

    let original = body[begin..begin + name.len()]
        .trim()
        .trim_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '-' | '*' | '"' | '\''))
        .trim();
    let capped = match original.char_indices().nth(MERCHANT_MAX_CHARS) {
        Some((i, _)) => original[..i].trim_end(),
        None => original,
    };
    if capped.chars().any(|c| c.is_ascii_alphabetic()) {
        Some(capped.to_string())
    } else {
        None
    }
}

/// Masked account suffix, normalized to the last four digits when the
/// message quotes more.
fn extract_account(lower: &str) -> Option<String> {
    let caps = account_re().captures(lower)?;
    let digits = caps.name("digits")?.as_str();
    let suffix = if digits.len() > 4 {
        &digits[digits.len() - 4..]
    } else {
        digits
    };
    Some(suffix.to_string())
}

/// Transaction reference (UPI ref / UTR / txn id). Requires at least
/// one digit so prose after "transaction" never qualifies.
fn extract_reference(body: &str, lower: &str) -> Option<String> {
    for caps in reference_re().captures_iter(lower) {
        let Some(m) = caps.name("ref") else { continue };
        if !m.as_str().chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        return Some(body[m.start()..m.end()].to_string());
    }
    None
}
