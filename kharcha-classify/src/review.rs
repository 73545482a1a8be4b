//! The human-in-the-loop review queue.
//!
//! Parsed transactions are never persisted directly. Each one is paired
//! with a suggested category or source, flagged when the parser's
//! confidence is low, and presented in inbox order for a person to
//! accept, edit, or skip.

use std::collections::HashMap;

use serde::Serialize;

use kharcha_core::{Direction, ParsedTransaction};

use crate::{category_rules, source_rules};

/// Below this parse confidence an item is flagged for manual review.
pub const DEFAULT_REVIEW_THRESHOLD: f64 = 0.60;

/// What the classifier proposes for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    Expense(kharcha_core::ExpenseCategory),
    Income(kharcha_core::IncomeSource),
}

impl Suggestion {
    /// Display label for queue listings.
    pub fn label(&self) -> &'static str {
        match self {
            Suggestion::Expense(category) => category.label(),
            Suggestion::Income(source) => source.label(),
        }
    }
}

/// One queue entry awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewItem {
    pub txn: ParsedTransaction,
    pub suggestion: Suggestion,
    pub needs_review: bool,
}

/// Classify each parsed transaction and order the queue the way the
/// inbox showed the messages: by timestamp, message id breaking ties.
///
/// Classification context is the extracted merchant when there is one,
/// otherwise the whole body; re-running it later on an edited merchant
/// gives the same suggestion for the same input.
pub fn build_review_queue(
    entries: Vec<(ParsedTransaction, String)>,
    threshold: f64,
) -> Vec<ReviewItem> {
    let mut items: Vec<ReviewItem> = entries
        .into_iter()
        .map(|(txn, body)| {
            let context = txn.merchant.clone().unwrap_or(body);
            let suggestion = match txn.direction {
                Direction::Debit => {
                    Suggestion::Expense(category_rules::classify_expense(&context))
                }
                Direction::Credit => Suggestion::Income(source_rules::classify_source(&context)),
            };
            let needs_review = txn.confidence < threshold;
            ReviewItem {
                txn,
                suggestion,
                needs_review,
            }
        })
        .collect();
    items.sort_by(|a, b| {
        (a.txn.timestamp, &a.txn.sms_id).cmp(&(b.txn.timestamp, &b.txn.sms_id))
    });
    items
}

/// Per-suggestion rollup line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionTotal {
    pub label: String,
    pub count: usize,
    pub total: f64,
}

/// Totals shown above the queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub total_items: usize,
    pub needs_review: usize,
    pub debit_total: f64,
    pub credit_total: f64,
    pub by_suggestion: Vec<SuggestionTotal>,
}

/// Roll a queue up into headline numbers, largest buckets first.
pub fn summarize(items: &[ReviewItem]) -> ReviewSummary {
    let mut debit_total = 0.0;
    let mut credit_total = 0.0;
    let mut needs_review = 0;
    let mut buckets: HashMap<&'static str, (usize, f64)> = HashMap::new();

    for item in items {
        match item.txn.direction {
            Direction::Debit => debit_total += item.txn.amount,
            Direction::Credit => credit_total += item.txn.amount,
        }
        if item.needs_review {
            needs_review += 1;
        }
        let bucket = buckets.entry(item.suggestion.label()).or_insert((0, 0.0));
        bucket.0 += 1;
        bucket.1 += item.txn.amount;
    }

    let mut by_suggestion: Vec<SuggestionTotal> = buckets
        .into_iter()
        .map(|(label, (count, total))| SuggestionTotal {
            label: label.to_string(),
            count,
            total,
        })
        .collect();
    // Amounts are finite by construction, so the comparison is total.
    by_suggestion.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap()
            .then_with(|| a.label.cmp(&b.label))
    });

    ReviewSummary {
        total_items: items.len(),
        needs_review,
        debit_total,
        credit_total,
        by_suggestion,
    }
}
