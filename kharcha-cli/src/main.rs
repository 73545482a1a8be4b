use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use kharcha_classify::{build_review_queue, classify_expense, classify_source, summarize};
use kharcha_core::ParsedTransaction;
use kharcha_sms::{sender, SmsRecord};

mod config;
mod export;

#[derive(Parser, Debug)]
#[command(
    name = "kharcha",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("KHARCHA_BUILD_SHA"), ")"),
    about = "Bank SMS expense tracker"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan an inbox CSV export and print the review queue
    Scan {
        /// Path to the inbox export (CSV)
        file: PathBuf,

        /// Emit the queue as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also list rejected bank messages (keyword-gate drops and parse failures)
        #[arg(long)]
        rejected: bool,

        /// Override the review threshold from config (0 to 1)
        #[arg(long)]
        threshold: Option<f64>,

        /// Override the timezone from config (IANA name)
        #[arg(long)]
        tz: Option<String>,
    },

    /// Parse a single message and print the extraction as JSON
    Parse {
        /// Sender id as it appears in the inbox
        #[arg(long)]
        sender: String,

        /// Message body
        #[arg(long)]
        body: String,

        /// Message id (default: cli-1)
        #[arg(long, default_value = "cli-1")]
        id: String,
    },

    /// Classify a merchant name or message snippet
    Classify {
        /// Text to classify
        text: String,

        /// Classify as an income source instead of an expense
        #[arg(long)]
        income: bool,
    },

    /// Write a default config to ~/.kharcha/config.toml
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            file,
            json,
            rejected,
            threshold,
            tz,
        } => {
            scan(&file, json, rejected, threshold, tz)?;
        }

        Command::Parse { sender, body, id } => {
            parse_one(&id, &sender, &body)?;
        }

        Command::Classify { text, income } => {
            if income {
                println!("{}", classify_source(&text).label());
            } else {
                println!("{}", classify_expense(&text).label());
            }
        }

        Command::Init => {
            config::init_config()?;
        }
    }

    Ok(())
}

fn scan(
    file: &Path,
    json: bool,
    rejected: bool,
    threshold: Option<f64>,
    tz: Option<String>,
) -> Result<()> {
    if !file.exists() {
        bail!("inbox export not found: {}", file.display());
    }

    let cfg = config::load_config()?;
    let threshold = config::resolve_review_threshold(threshold, cfg.scan.review_threshold)?;
    let tz = tz.unwrap_or(cfg.scan.timezone);
    if tz.parse::<chrono_tz::Tz>().is_err() {
        bail!("unknown timezone: {} (expected an IANA name)", tz);
    }

    let inbox = export::read_inbox_csv(file, &tz)
        .with_context(|| format!("reading {}", file.display()))?;

    let buckets = bucket_inbox(&inbox);
    let queue = build_review_queue(buckets.parsed, threshold);
    let summary = summarize(&queue);

    if json {
        println!("{}", serde_json::to_string_pretty(&queue)?);
        return Ok(());
    }

    println!(
        "Scanned {} messages from {} ({} transactional)",
        inbox.len(),
        file.display(),
        queue.len()
    );
    println!();

    for item in &queue {
        let txn = &item.txn;
        let bank = sender::bank_name(&txn.sender_id)
            .map(str::to_string)
            .unwrap_or_else(|| sender::normalize_sender(&txn.sender_id));
        let sign = if txn.is_debit() { "-" } else { "+" };
        let merchant = txn.merchant.as_deref().unwrap_or("(no merchant)");
        let flag = if item.needs_review { " | REVIEW" } else { "" };
        println!(
            "[{}] {} | {}{:.2} | {} | {} | conf={:.2}{}",
            txn.timestamp.format("%Y-%m-%d %H:%M"),
            bank,
            sign,
            txn.amount,
            merchant,
            item.suggestion.label(),
            txn.confidence,
            flag
        );
    }

    println!(
        "\nDebits: {:.2} | Credits: {:.2} | Needs review: {}/{}",
        summary.debit_total, summary.credit_total, summary.needs_review, summary.total_items
    );
    for bucket in &summary.by_suggestion {
        println!("  {} x{} = {:.2}", bucket.label, bucket.count, bucket.total);
    }

    if rejected {
        println!(
            "\nBank messages rejected by the keyword gate ({}):",
            buckets.gate_rejected.len()
        );
        for sms in &buckets.gate_rejected {
            println!("  [{}] {}", sms.sender_id, sms.body);
        }
        println!(
            "\nPassed the keyword gate but no amount parsed ({}):",
            buckets.unparsed.len()
        );
        for sms in &buckets.unparsed {
            println!("  [{}] {}", sms.sender_id, sms.body);
        }
    }

    Ok(())
}

/// Per-message scan outcome: parsed transactions paired with their
/// source body (the classifier falls back to it), bank-sender messages
/// the keyword gate dropped, and gate passers with no extractable
/// amount.
struct ScanBuckets<'a> {
    parsed: Vec<(ParsedTransaction, String)>,
    gate_rejected: Vec<&'a SmsRecord>,
    unparsed: Vec<&'a SmsRecord>,
}

fn bucket_inbox(inbox: &[SmsRecord]) -> ScanBuckets<'_> {
    let mut parsed = Vec::new();
    let mut gate_rejected = Vec::new();
    let mut unparsed = Vec::new();
    for sms in inbox {
        if !kharcha_sms::can_parse(&sms.sender_id, &sms.body) {
            // A personal sender is the gate doing its job; a bank sender
            // failing the gate is worth a look under --rejected.
            if sender::is_bank_sender(&sms.sender_id) {
                gate_rejected.push(sms);
            }
            continue;
        }
        match kharcha_sms::parse(&sms.sender_id, &sms.body, &sms.sms_id, sms.timestamp) {
            Some(txn) => parsed.push((txn, sms.body.clone())),
            None => unparsed.push(sms),
        }
    }
    ScanBuckets {
        parsed,
        gate_rejected,
        unparsed,
    }
}

fn parse_one(id: &str, sender: &str, body: &str) -> Result<()> {
    let sms = SmsRecord::new(id, sender, body, Utc::now());
    if !kharcha_sms::can_parse(&sms.sender_id, &sms.body) {
        bail!("message does not look like a bank transaction");
    }
    let Some(txn) = kharcha_sms::parse(&sms.sender_id, &sms.body, &sms.sms_id, sms.timestamp)
    else {
        bail!("keyword gate passed but no transaction amount was found");
    };
    println!("{}", serde_json::to_string_pretty(&txn)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bucket_inbox_separates_rejection_classes() {
        let ts = Utc.with_ymd_and_hms(2026, 2, 4, 10, 0, 0).unwrap();
        let inbox = vec![
            SmsRecord::new("m-1", "VM-HDFCBK", "Rs.500 debited at Starbucks", ts),
            SmsRecord::new("m-2", "VM-HDFCBK", "Your OTP is 482913. Do not share it.", ts),
            SmsRecord::new(
                "m-3",
                "VM-HDFCBK",
                "Your A/c XX1234 has been credited. Avl bal Rs.5,230.50",
                ts,
            ),
            SmsRecord::new("m-4", "9876543210", "Rs.500 debited at Starbucks", ts),
        ];

        let buckets = bucket_inbox(&inbox);
        assert_eq!(buckets.parsed.len(), 1);
        assert_eq!(buckets.parsed[0].0.sms_id, "m-1");
        // The OTP from a bank header surfaces for inspection; the same
        // transactional body from a personal number stays out entirely.
        assert_eq!(buckets.gate_rejected.len(), 1);
        assert_eq!(buckets.gate_rejected[0].sms_id, "m-2");
        assert_eq!(buckets.unparsed.len(), 1);
        assert_eq!(buckets.unparsed[0].sms_id, "m-3");
    }
}
