use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer risk points awarded by analyzers before clamping.
pub type Points = u32;

/// Weights and multiplicative factors expressed as decimals (0.35 = 35%).
pub type Weight = Decimal;

/// Entities are identified solely by their (trimmed) name.
pub type EntityName = String;

/// Coarse transaction size category standing in for an exact amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountBucket {
    Small,
    Medium,
    Large,
    VeryLarge,
}

impl AmountBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmountBucket::Small => "small",
            AmountBucket::Medium => "medium",
            AmountBucket::Large => "large",
            AmountBucket::VeryLarge => "very_large",
        }
    }

    /// Small and medium transfers are the ones layering schemes move around.
    pub fn is_layering_size(&self) -> bool {
        matches!(self, AmountBucket::Small | AmountBucket::Medium)
    }
}

impl fmt::Display for AmountBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared purpose of a transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionPurpose {
    Invoice,
    Salary,
    Contract,
    #[default]
    Unknown,
}

/// A validated transaction. Built once at ingestion and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub sender: EntityName,
    pub receiver: EntityName,
    pub amount_bucket: AmountBucket,
    pub timestamp: DateTime<Utc>,
    pub purpose: TransactionPurpose,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "integer points, rust_decimal_128bit weights".to_string(),
        },
    }
}
