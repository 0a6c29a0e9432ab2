//! Weighted aggregation of externally supplied sub-scores.
//!
//! Used when the four dimension scores (transaction, company, network,
//! confidence) come from an outside reviewer rather than the structural
//! analyzer. The weighted sum goes through the same clamp-and-classify step
//! as cluster analysis.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::classification::{clamp_decimal_score, classify, RiskClassification};
use crate::types::Weight;
use crate::{ClusterRiskError, ClusterRiskResult};

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    pub transaction: Weight,
    pub company: Weight,
    pub network: Weight,
    pub confidence: Weight,
}

impl Default for RiskWeights {
    fn default() -> Self {
        RiskWeights {
            transaction: dec!(0.35),
            company: dec!(0.25),
            network: dec!(0.30),
            confidence: dec!(0.10),
        }
    }
}

impl RiskWeights {
    fn total(&self) -> Decimal {
        self.transaction + self.company + self.network + self.confidence
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedRiskInput {
    /// Laundering indicators, 0-100.
    pub transaction_score: Decimal,
    /// Shell-company indicators, 0-100.
    pub company_score: Decimal,
    /// Graph anomalies, 0-100.
    pub network_score: Decimal,
    /// Evidence quality, 0-100.
    pub confidence_score: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<RiskWeights>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedComponents {
    pub transaction: Decimal,
    pub company: Decimal,
    pub network: Decimal,
    pub confidence: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedRiskOutput {
    pub risk_score: u32,
    pub classification: RiskClassification,
    pub weighted_components: WeightedComponents,
    pub weights: RiskWeights,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Combine four sub-scores with fixed weights and classify the result.
pub fn score_weighted_risk(input: &WeightedRiskInput) -> ClusterRiskResult<WeightedRiskOutput> {
    validate_sub_score("transaction_score", input.transaction_score)?;
    validate_sub_score("company_score", input.company_score)?;
    validate_sub_score("network_score", input.network_score)?;
    validate_sub_score("confidence_score", input.confidence_score)?;

    let weights = input.weights.clone().unwrap_or_default();
    validate_weights(&weights)?;

    let weighted_components = WeightedComponents {
        transaction: input.transaction_score * weights.transaction,
        company: input.company_score * weights.company,
        network: input.network_score * weights.network,
        confidence: input.confidence_score * weights.confidence,
    };
    let total = weighted_components.transaction
        + weighted_components.company
        + weighted_components.network
        + weighted_components.confidence;

    let risk_score = clamp_decimal_score(total);
    let classification = classify(risk_score);

    tracing::debug!(
        %total,
        risk_score,
        classification = classification.label(),
        "weighted risk scored"
    );

    Ok(WeightedRiskOutput {
        risk_score,
        classification,
        weighted_components,
        weights,
    })
}

fn validate_sub_score(field: &str, value: Decimal) -> ClusterRiskResult<()> {
    if value < Decimal::ZERO || value > dec!(100) {
        return Err(ClusterRiskError::invalid(field, "Must be between 0 and 100"));
    }
    Ok(())
}

fn validate_weights(weights: &RiskWeights) -> ClusterRiskResult<()> {
    let all = [
        ("weights.transaction", weights.transaction),
        ("weights.company", weights.company),
        ("weights.network", weights.network),
        ("weights.confidence", weights.confidence),
    ];
    for (field, w) in all {
        if w < Decimal::ZERO {
            return Err(ClusterRiskError::invalid(field, "Weight must be non-negative"));
        }
    }
    if weights.total() != Decimal::ONE {
        return Err(ClusterRiskError::invalid(
            "weights",
            format!("Weights must sum to 1 (got {})", weights.total()),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
