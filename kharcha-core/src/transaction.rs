//! Transaction types shared by the SMS parser and the classifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a bank transaction: debits decrease the account balance,
/// credits increase it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    #[serde(rename = "debit")]
    Debit,
    #[serde(rename = "credit")]
    Credit,
}

/// Expense categories suggested for debit transactions (closed set)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    #[serde(rename = "food")]
    Food,
    #[serde(rename = "transport")]
    Transport,
    #[serde(rename = "shopping")]
    Shopping,
    #[serde(rename = "entertainment")]
    Entertainment,
    #[serde(rename = "bills")]
    Bills,
    #[serde(rename = "health")]
    Health,
    #[serde(rename = "education")]
    Education,
    #[serde(rename = "other")]
    Other,
}

impl ExpenseCategory {
    /// Display name for review screens
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Food & Dining",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Bills => "Bills & Utilities",
            ExpenseCategory::Health => "Health",
            ExpenseCategory::Education => "Education",
            ExpenseCategory::Other => "Other",
        }
    }

    /// All categories, in display order. The review collaborator cycles
    /// through these when the user edits a suggestion.
    pub fn all() -> &'static [ExpenseCategory] {
        &[
            ExpenseCategory::Food,
            ExpenseCategory::Transport,
            ExpenseCategory::Shopping,
            ExpenseCategory::Entertainment,
            ExpenseCategory::Bills,
            ExpenseCategory::Health,
            ExpenseCategory::Education,
            ExpenseCategory::Other,
        ]
    }
}

/// Income sources suggested for credit transactions (closed set)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IncomeSource {
    #[serde(rename = "salary")]
    Salary,
    #[serde(rename = "business")]
    Business,
    #[serde(rename = "investment")]
    Investment,
    #[serde(rename = "interest")]
    Interest,
    #[serde(rename = "refund")]
    Refund,
    #[serde(rename = "cashback")]
    Cashback,
    #[serde(rename = "transfer")]
    Transfer,
    #[serde(rename = "other")]
    Other,
}

impl IncomeSource {
    /// Display name for review screens
    pub fn label(&self) -> &'static str {
        match self {
            IncomeSource::Salary => "Salary",
            IncomeSource::Business => "Business",
            IncomeSource::Investment => "Investment",
            IncomeSource::Interest => "Interest",
            IncomeSource::Refund => "Refund",
            IncomeSource::Cashback => "Cashback",
            IncomeSource::Transfer => "Transfer",
            IncomeSource::Other => "Other",
        }
    }

    /// All sources, in display order
    pub fn all() -> &'static [IncomeSource] {
        &[
            IncomeSource::Salary,
            IncomeSource::Business,
            IncomeSource::Investment,
            IncomeSource::Interest,
            IncomeSource::Refund,
            IncomeSource::Cashback,
            IncomeSource::Transfer,
            IncomeSource::Other,
        ]
    }
}

/// A structured transaction extracted from one bank SMS.
///
/// Transient: the review collaborator converts it into a persisted
/// expense/income record only after the user confirms it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedTransaction {
    /// Message id of the source SMS (pass-through identity)
    pub sms_id: String,
    /// Sender header of the source SMS (pass-through)
    pub sender_id: String,
    /// Device receive time of the source SMS (pass-through)
    pub timestamp: DateTime<Utc>,
    /// Debit or credit, from keyword evidence in the body
    pub direction: Direction,
    /// Transaction amount; strictly positive
    pub amount: f64,
    /// Counterparty name, when the message exposes one
    pub merchant: Option<String>,
    /// Trailing digits of the account/card the message references
    pub account_suffix: Option<String>,
    /// Post-transaction available balance, when stated
    pub balance: Option<f64>,
    /// Bank reference / UTR number, when stated
    pub reference: Option<String>,
    /// Extraction certainty in [0, 1]; more extracted fields never
    /// score lower than fewer
    pub confidence: f64,
}

impl ParsedTransaction {
    /// Returns true for expense-side transactions
    pub fn is_debit(&self) -> bool {
        self.direction == Direction::Debit
    }

    /// Returns true for income-side transactions
    pub fn is_credit(&self) -> bool {
        self.direction == Direction::Credit
    }

    /// Amount signed by direction: negative for debits, positive for
    /// credits. Useful when feeding ledger-style collaborators.
    pub fn signed_amount(&self) -> f64 {
        match self.direction {
            Direction::Debit => -self.amount,
            Direction::Credit => self.amount,
        }
    }
}
