//! kharcha-sms: bank SMS ingestion - the sender gate, keyword evidence
//! tables, and the transaction parser.

pub mod keywords;
pub mod parser;
pub mod sender;
pub mod types;

pub use parser::{can_parse, parse};
pub use types::SmsRecord;
