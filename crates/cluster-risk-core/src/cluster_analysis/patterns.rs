//! Structured findings emitted by the analyzers.
//!
//! Detection code only builds [`PatternTag`] values; the textual tag grammar
//! (`density_spike:A→B`, `repetition:A→B:smallx11`, ...) is produced by
//! `Display` at the response boundary.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::graph::EntityPair;
use crate::types::{AmountBucket, Points};

/// A tag together with the points its analyzer awarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub tag: PatternTag,
    pub points: Points,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternTag {
    DensitySpike {
        pair: EntityPair,
        window_count: u32,
    },
    Repetition {
        pair: EntityPair,
        bucket: AmountBucket,
        count: u32,
    },
    /// `path` starts and ends at the same entity.
    CircularFlow { path: Vec<String> },
    NetworkIsolation {
        internal_transactions: usize,
        total_transactions: usize,
        entity_count: usize,
    },
    LegitimacyDampenerApplied {
        entity: String,
        connections: usize,
        factor: Decimal,
    },
}

impl PatternTag {
    pub fn kind(&self) -> &'static str {
        match self {
            PatternTag::DensitySpike { .. } => "density_spike",
            PatternTag::Repetition { .. } => "repetition",
            PatternTag::CircularFlow { .. } => "circular_flow",
            PatternTag::NetworkIsolation { .. } => "network_isolation",
            PatternTag::LegitimacyDampenerApplied { .. } => "legitimacy_dampener_applied",
        }
    }

    /// False only for the dampener, which lowers risk rather than signalling it.
    pub fn is_risk_signal(&self) -> bool {
        !matches!(self, PatternTag::LegitimacyDampenerApplied { .. })
    }

    /// One-line, neutral description for reports.
    pub fn describe(&self) -> String {
        match self {
            PatternTag::DensitySpike { pair, .. } => {
                format!("Micro-transaction density spike detected on path {pair}")
            }
            PatternTag::Repetition {
                pair,
                bucket,
                count,
            } => format!("Repetition pattern: {pair} {bucket}x{count}"),
            PatternTag::CircularFlow { path } => {
                format!("Circular flow detected: {}", path.join("→"))
            }
            PatternTag::NetworkIsolation { .. } => {
                "Network isolation: entities transact primarily within a closed group".to_string()
            }
            PatternTag::LegitimacyDampenerApplied { factor, .. } => {
                let reduction = ((Decimal::ONE - *factor) * dec!(100)).normalize();
                format!("Legitimacy dampener applied: risk reduced {reduction}%")
            }
        }
    }
}

impl fmt::Display for PatternTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternTag::DensitySpike { pair, .. } => write!(f, "density_spike:{pair}"),
            PatternTag::Repetition {
                pair,
                bucket,
                count,
            } => write!(f, "repetition:{pair}:{bucket}x{count}"),
            PatternTag::CircularFlow { path } => {
                write!(f, "circular_flow:{}", path.join("→"))
            }
            PatternTag::NetworkIsolation { .. } => f.write_str("network_isolation"),
            PatternTag::LegitimacyDampenerApplied { .. } => {
                f.write_str("legitimacy_dampener_applied")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
