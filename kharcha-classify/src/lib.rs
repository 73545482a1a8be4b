//! kharcha-classify: keyword classification of parsed transactions and
//! the review queue a human confirms before anything is persisted.

pub mod category_rules;
pub mod review;
pub mod source_rules;

pub use category_rules::classify_expense;
pub use review::{
    build_review_queue, summarize, ReviewItem, ReviewSummary, Suggestion, SuggestionTotal,
    DEFAULT_REVIEW_THRESHOLD,
};
pub use source_rules::classify_source;
