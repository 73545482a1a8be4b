//! Read SMS inbox exports (CSV) into typed records.
//!
//! Backup tools disagree on column names: SMS Backup & Restore writes
//! `_id,address,body,date` with epoch-millis dates, other apps write
//! `sender,message,timestamp` with RFC3339 or naive local times. The
//! reader resolves columns by alias and normalizes timestamps to UTC.

use anyhow::{bail, Context, Result};
use kharcha_core::time::parse_export_timestamp;
use kharcha_sms::SmsRecord;
use std::io::Read;
use std::path::Path;

const ID_ALIASES: &[&str] = &["id", "_id", "sms_id", "message_id"];
const SENDER_ALIASES: &[&str] = &["sender", "sender_id", "address", "from"];
const BODY_ALIASES: &[&str] = &["body", "message", "text"];
const TIMESTAMP_ALIASES: &[&str] = &["timestamp", "date", "time"];

/// Read an inbox CSV export, returning one record per usable row.
///
/// Naive local timestamps are resolved in the IANA timezone `tz`. Rows
/// with a missing id, sender, or body, or a timestamp no parser
/// recognizes, are skipped rather than failing the whole file.
pub fn read_inbox_csv(path: impl AsRef<Path>, tz: &str) -> Result<Vec<SmsRecord>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    read_inbox_reader(file, tz)
}

/// Same as [`read_inbox_csv`] over any reader.
pub fn read_inbox_reader<R: Read>(input: R, tz: &str) -> Result<Vec<SmsRecord>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(input);

    let headers = rdr.headers().context("reading CSV header row")?.clone();
    let id_col = find_column(&headers, ID_ALIASES)?;
    let sender_col = find_column(&headers, SENDER_ALIASES)?;
    let body_col = find_column(&headers, BODY_ALIASES)?;
    let ts_col = find_column(&headers, TIMESTAMP_ALIASES)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;

        let id = record.get(id_col).unwrap_or("").trim();
        let sender = record.get(sender_col).unwrap_or("").trim();
        let body = record.get(body_col).unwrap_or("").trim();
        if id.is_empty() || sender.is_empty() || body.is_empty() {
            continue;
        }

        let raw_ts = record.get(ts_col).unwrap_or("").trim();
        let timestamp = match parse_export_timestamp(raw_ts, tz) {
            Ok(ts) => ts,
            Err(_) => continue, // skip unparseable rows
        };

        records.push(SmsRecord::new(id, sender, body, timestamp));
    }

    Ok(records)
}

fn find_column(headers: &csv::StringRecord, aliases: &[&str]) -> Result<usize> {
    for (idx, name) in headers.iter().enumerate() {
        let name = name.trim().to_ascii_lowercase();
        if aliases.contains(&name.as_str()) {
            return Ok(idx);
        }
    }
    bail!("CSV header has no column named one of {:?}", aliases)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_export_headers_epoch_millis() {
        let data = "_id,address,body,date\n\
                    101,AX-HDFCBK,Rs.500 debited from A/c XX1234,1770179400000\n";
        let recs = read_inbox_reader(data.as_bytes(), "Asia/Kolkata").unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].sms_id, "101");
        assert_eq!(recs[0].sender_id, "AX-HDFCBK");
        assert_eq!(recs[0].body, "Rs.500 debited from A/c XX1234");
        assert_eq!(recs[0].timestamp.to_rfc3339(), "2026-02-04T04:30:00+00:00");
    }

    #[test]
    fn test_plain_headers_mixed_case_rfc3339() {
        let data = "Id,Sender,Text,Timestamp\n\
                    201,VM-ICICIB,Acct XX7890 credited,2026-02-04T09:30:00+05:30\n";
        let recs = read_inbox_reader(data.as_bytes(), "Asia/Kolkata").unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].timestamp.to_rfc3339(), "2026-02-04T04:00:00+00:00");
    }

    #[test]
    fn test_skips_rows_missing_fields_or_bad_timestamps() {
        let data = "id,sender,text,timestamp\n\
                    301,AX-HDFCBK,first,1770179400\n\
                    302,,sender missing,1770179400\n\
                    303,AX-HDFCBK,,1770179400\n\
                    304,AX-HDFCBK,bad clock,not-a-time\n\
                    305,AX-HDFCBK,\"Rs.1,200.00 spent\",1770179400000\n";
        let recs = read_inbox_reader(data.as_bytes(), "Asia/Kolkata").unwrap();
        let ids: Vec<&str> = recs.iter().map(|r| r.sms_id.as_str()).collect();
        assert_eq!(ids, vec!["301", "305"]);
        assert_eq!(recs[1].body, "Rs.1,200.00 spent");
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let data = "when,who,what\n1,2,3\n";
        assert!(read_inbox_reader(data.as_bytes(), "Asia/Kolkata").is_err());
    }
}
