//! Ordered keyword rules mapping credit context to income sources.
//!
//! Same first-match design as the expense rules. Salary sits first so
//! "NEFT-SALARY" resolves to Salary, not to the NEFT transfer rail; the
//! bare rails sit last as the weakest evidence.

use kharcha_core::text::normalize;
use kharcha_core::IncomeSource;

const SALARY: &[&str] = &["salary", "payroll", "wages", "stipend"];

const REFUND: &[&str] = &["refund", "reversal", "reversed", "rfnd"];

const INTEREST: &[&str] = &["interest", "int.cr", "int cr"];

const INVESTMENT: &[&str] = &["dividend", "redemption", "maturity", "matured", "mutual fund"];

const CASHBACK: &[&str] = &["cashback", "cash back", "reward"];

const BUSINESS: &[&str] = &["invoice", "client", "freelance", "consulting"];

const TRANSFER: &[&str] = &["upi", "imps", "neft", "rtgs", "transfer", "trf"];

fn any_of(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

/// Map credit context (merchant text or the raw message) to an income
/// source. First matching rule wins; empty or unknown input falls
/// through to Other.
pub fn classify_source(text: &str) -> IncomeSource {
    let text = normalize(text);
    if text.is_empty() {
        return IncomeSource::Other;
    }

    if any_of(&text, SALARY) {
        return IncomeSource::Salary;
    }
    if any_of(&text, REFUND) {
        return IncomeSource::Refund;
    }
    if any_of(&text, INTEREST) {
        return IncomeSource::Interest;
    }
    if any_of(&text, INVESTMENT) {
        return IncomeSource::Investment;
    }
    if any_of(&text, CASHBACK) {
        return IncomeSource::Cashback;
    }
    if any_of(&text, BUSINESS) {
        return IncomeSource::Business;
    }
    if any_of(&text, TRANSFER) {
        return IncomeSource::Transfer;
    }

    IncomeSource::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_beats_transfer_rail() {
        assert_eq!(classify_source("NEFT-SALARY JAN 2026"), IncomeSource::Salary);
        assert_eq!(classify_source("Salary"), IncomeSource::Salary);
    }

    #[test]
    fn test_known_sources() {
        assert_eq!(classify_source("Refund for order cancellation"), IncomeSource::Refund);
        assert_eq!(classify_source("Int.Cr. Q3 FY26"), IncomeSource::Interest);
        assert_eq!(classify_source("Dividend HDFC AMC"), IncomeSource::Investment);
        assert_eq!(classify_source("Cashback credited"), IncomeSource::Cashback);
        assert_eq!(classify_source("Invoice #1142 client payment"), IncomeSource::Business);
    }

    #[test]
    fn test_bare_rails_are_transfers() {
        assert_eq!(classify_source("UPI/P2A/402912345678/RAHUL"), IncomeSource::Transfer);
        assert_eq!(classify_source("IMPS from 9876XXXX"), IncomeSource::Transfer);
    }

    #[test]
    fn test_default_and_idempotence() {
        assert_eq!(classify_source(""), IncomeSource::Other);
        assert_eq!(classify_source("something else entirely"), IncomeSource::Other);
        assert_eq!(
            classify_source("NEFT-SALARY JAN 2026"),
            classify_source("NEFT-SALARY JAN 2026")
        );
    }
}
