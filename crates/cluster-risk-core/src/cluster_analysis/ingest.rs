//! Ingestion boundary: wire records in, validated [`TransactionRecord`]s out.
//!
//! This is the only place malformed input is rejected. Past this point every
//! analyzer runs over well-formed, immutable records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{AmountBucket, TransactionPurpose, TransactionRecord};
use crate::{ClusterRiskError, ClusterRiskResult};

/// Smallest batch worth analysing.
pub const MIN_USABLE_RECORDS: usize = 2;

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// A transaction as submitted by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecordInput {
    pub sender_entity: String,
    pub receiver_entity: String,
    pub amount_range: AmountBucket,
    pub timestamp: String,
    #[serde(default)]
    pub transaction_purpose: TransactionPurpose,
}

#[derive(Debug, Clone)]
pub struct IngestedBatch {
    pub records: Vec<TransactionRecord>,
    pub dropped: usize,
    pub warnings: Vec<String>,
}

/// Validate and normalise a raw batch.
///
/// Records with a blank sender or receiver are dropped with a warning.
/// Fewer than [`MIN_USABLE_RECORDS`] survivors, or any unparseable timestamp
/// among them, is an error.
pub fn ingest_records(raw: &[TransactionRecordInput]) -> ClusterRiskResult<IngestedBatch> {
    let mut records = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();
    let mut dropped = 0usize;

    for (i, r) in raw.iter().enumerate() {
        let sender = r.sender_entity.trim();
        let receiver = r.receiver_entity.trim();
        if sender.is_empty() || receiver.is_empty() {
            dropped += 1;
            tracing::warn!(index = i, "dropping record with blank sender or receiver");
            continue;
        }

        let timestamp = parse_timestamp(&r.timestamp).ok_or_else(|| {
            ClusterRiskError::invalid(
                format!("records[{i}].timestamp"),
                format!("'{}' is not a recognised ISO-8601 instant", r.timestamp),
            )
        })?;

        records.push(TransactionRecord {
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            amount_bucket: r.amount_range,
            timestamp,
            purpose: r.transaction_purpose,
        });
    }

    if dropped > 0 {
        warnings.push(format!(
            "{dropped} record(s) dropped for blank sender or receiver"
        ));
    }

    if records.len() < MIN_USABLE_RECORDS {
        return Err(ClusterRiskError::InsufficientData(format!(
            "At least {MIN_USABLE_RECORDS} records with non-empty sender and receiver are required (got {})",
            records.len()
        )));
    }

    Ok(IngestedBatch {
        records,
        dropped,
        warnings,
    })
}

/// Parse an ISO-8601 instant. Offset-less forms are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
