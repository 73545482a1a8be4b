//! kharcha-core: domain types and shared helpers for the kharcha
//! SMS-transaction pipeline.

pub mod text;
pub mod time;
pub mod transaction;

pub use transaction::{Direction, ExpenseCategory, IncomeSource, ParsedTransaction};
