//! Time utilities: resolving exported SMS timestamps to UTC.

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse a timestamp column from an inbox export, returning UTC.
///
/// Accepts the formats backup tools actually emit: epoch milliseconds
/// (13 digits, Android backups), epoch seconds (10 digits), RFC3339, or
/// a naive local "YYYY-MM-DD HH:MM[:SS]" resolved in the IANA timezone
/// `tz` (e.g. "Asia/Kolkata").
pub fn parse_export_timestamp(raw: &str, tz: &str) -> Result<DateTime<Utc>> {
    let s = raw.trim();
    if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
        let n: i64 = s
            .parse()
            .map_err(|_| anyhow::anyhow!("epoch value out of range: {s}"))?;
        return epoch_to_utc(n);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    parse_local_to_utc(s, tz)
}

fn epoch_to_utc(n: i64) -> Result<DateTime<Utc>> {
    // 13+ digit values are epoch millis; anything shorter is seconds.
    let dt = if n >= 1_000_000_000_000 {
        Utc.timestamp_millis_opt(n).single()
    } else {
        Utc.timestamp_opt(n, 0).single()
    };
    dt.ok_or_else(|| anyhow::anyhow!("epoch value out of range: {n}"))
}

/// Parse a naive local datetime like "2026-02-04 09:30" in an IANA tz
/// like "Asia/Kolkata", returning UTC.
pub fn parse_local_to_utc(local: &str, tz: &str) -> Result<DateTime<Utc>> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;

    let ndt = NaiveDateTime::parse_from_str(local, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(local, "%Y-%m-%d %H:%M"))
        .map_err(|e| anyhow::anyhow!("invalid local datetime '{local}': {e}"))?;

    let local_dt = tz
        .from_local_datetime(&ndt)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous or invalid local time (DST?): {local} {tz}"))?;

    Ok(local_dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kolkata_local() {
        // IST is UTC+5:30, no DST
        let utc = parse_local_to_utc("2026-02-04 09:30:00", "Asia/Kolkata").unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-02-04T04:00:00+00:00");
    }

    #[test]
    fn test_parse_export_epoch_millis() {
        let utc = parse_export_timestamp("1770179400000", "Asia/Kolkata").unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-02-04T04:30:00+00:00");
    }

    #[test]
    fn test_parse_export_epoch_seconds() {
        let utc = parse_export_timestamp("1770179400", "Asia/Kolkata").unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-02-04T04:30:00+00:00");
    }

    #[test]
    fn test_parse_export_rfc3339() {
        let utc = parse_export_timestamp("2026-02-04T10:00:00+05:30", "Asia/Kolkata").unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-02-04T04:30:00+00:00");
    }

    #[test]
    fn test_parse_export_rejects_garbage() {
        assert!(parse_export_timestamp("yesterday", "Asia/Kolkata").is_err());
        assert!(parse_export_timestamp("2026-02-04 09:30", "Not/AZone").is_err());
    }
}
