//! Shared clamp-and-classify step.
//!
//! Both the structural cluster analyzer and the weighted sub-score path map
//! their totals through [`classify`], so tier boundaries stay identical.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Points;

/// Upper bound of every risk score.
pub const MAX_SCORE: u32 = 100;

pub const CRITICAL_THRESHOLD: u32 = 75;
pub const HIGH_THRESHOLD: u32 = 50;
pub const MODERATE_THRESHOLD: u32 = 25;

/// Four-tier risk classification, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskClassification {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskClassification {
    pub fn label(&self) -> &'static str {
        match self {
            RiskClassification::Low => "Low",
            RiskClassification::Moderate => "Moderate",
            RiskClassification::High => "High",
            RiskClassification::Critical => "Critical",
        }
    }

    /// Wording used when the tier describes a transaction cluster.
    pub fn anomaly_label(&self) -> &'static str {
        match self {
            RiskClassification::Low => "Low anomaly",
            RiskClassification::Moderate => "Moderate anomaly",
            RiskClassification::High => "High anomaly",
            RiskClassification::Critical => "Critical anomaly",
        }
    }
}

impl fmt::Display for RiskClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Clamp accumulated points to `[0, 100]`.
pub fn clamp_score(points: Points) -> u32 {
    points.min(MAX_SCORE)
}

/// Round a decimal score half away from zero and clamp it to `[0, 100]`.
pub fn clamp_decimal_score(score: Decimal) -> u32 {
    let rounded = score.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if rounded <= Decimal::ZERO {
        return 0;
    }
    if rounded >= Decimal::from(MAX_SCORE) {
        return MAX_SCORE;
    }
    rounded.to_u32().unwrap_or(0)
}

/// Map a clamped score to its tier: >=75 Critical, >=50 High, >=25 Moderate.
pub fn classify(score: u32) -> RiskClassification {
    if score >= CRITICAL_THRESHOLD {
        RiskClassification::Critical
    } else if score >= HIGH_THRESHOLD {
        RiskClassification::High
    } else if score >= MODERATE_THRESHOLD {
        RiskClassification::Moderate
    } else {
        RiskClassification::Low
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
