//! Raw inbox records as they arrive from a device export, before any parsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single SMS row from an inbox export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsRecord {
    /// Stable identifier from the export. Used for dedup and as the
    /// tie-breaker when two messages share a timestamp.
    pub sms_id: String,
    /// Sender field exactly as delivered, e.g. "VM-HDFCBK" or "AD-ICICIB-S".
    pub sender_id: String,
    /// Full message text.
    pub body: String,
    /// Delivery time, normalized to UTC.
    pub timestamp: DateTime<Utc>,
}

impl SmsRecord {
    pub fn new(
        sms_id: impl Into<String>,
        sender_id: impl Into<String>,
        body: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            sms_id: sms_id.into(),
            sender_id: sender_id.into(),
            body: body.into(),
            timestamp,
        }
    }
}
