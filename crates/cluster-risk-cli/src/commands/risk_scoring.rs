use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::time::Instant;

use cluster_risk_core::risk_scoring::classification;
use cluster_risk_core::risk_scoring::weighted::{self, WeightedRiskInput};
use cluster_risk_core::with_metadata;

use crate::input;

/// Arguments for weighted sub-score aggregation
#[derive(Args)]
pub struct WeightedRiskArgs {
    /// Transaction (laundering indicator) score, 0-100
    #[arg(long)]
    pub transaction_score: Option<Decimal>,

    /// Company (shell indicator) score, 0-100
    #[arg(long)]
    pub company_score: Option<Decimal>,

    /// Network (graph anomaly) score, 0-100
    #[arg(long)]
    pub network_score: Option<Decimal>,

    /// Confidence (evidence quality) score, 0-100
    #[arg(long)]
    pub confidence_score: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for score classification
#[derive(Args)]
pub struct ClassifyArgs {
    /// Risk score; values above 100 are clamped
    #[arg(long)]
    pub score: u32,
}

pub fn run_weighted_risk(args: WeightedRiskArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let risk_input: WeightedRiskInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        WeightedRiskInput {
            transaction_score: args
                .transaction_score
                .ok_or("--transaction-score is required (or provide --input)")?,
            company_score: args
                .company_score
                .ok_or("--company-score is required (or provide --input)")?,
            network_score: args
                .network_score
                .ok_or("--network-score is required (or provide --input)")?,
            confidence_score: args
                .confidence_score
                .ok_or("--confidence-score is required (or provide --input)")?,
            weights: None,
        }
    };

    let start = Instant::now();
    let result = weighted::score_weighted_risk(&risk_input)?;
    let elapsed = start.elapsed().as_micros() as u64;

    let assumptions = json!({ "weights": result.weights });
    Ok(serde_json::to_value(with_metadata(
        "Weighted sum of four sub-scores, rounded half away from zero",
        &assumptions,
        Vec::new(),
        elapsed,
        result,
    ))?)
}

pub fn run_classify(args: ClassifyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let score = classification::clamp_score(args.score);
    let level = classification::classify(score);
    Ok(json!({
        "risk_score": score,
        "classification": level,
        "anomaly_label": level.anomaly_label(),
    }))
}
