use napi::Result as NapiResult;
use napi_derive::napi;

use cluster_risk_core::cluster_analysis::{self, ClusterAnalysisInput};
use cluster_risk_core::risk_scoring::classification;
use cluster_risk_core::risk_scoring::weighted::{self, WeightedRiskInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Cluster analysis
// ---------------------------------------------------------------------------

/// Score a batch and return the four-field response:
/// `{cluster_risk_score, classification, entities_involved, detected_patterns}`.
#[napi]
pub fn analyze_cluster(input_json: String) -> NapiResult<String> {
    let input: ClusterAnalysisInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = cluster_analysis::analyze_cluster(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output.to_response()).map_err(to_napi_error)
}

/// Full analysis including structured findings and the point breakdown.
#[napi]
pub fn analyze_cluster_detailed(input_json: String) -> NapiResult<String> {
    let input: ClusterAnalysisInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = cluster_analysis::analyze_cluster(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Risk scoring
// ---------------------------------------------------------------------------

#[napi]
pub fn score_weighted_risk(input_json: String) -> NapiResult<String> {
    let input: WeightedRiskInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = weighted::score_weighted_risk(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Classification label for a 0-100 score; larger values classify as Critical.
#[napi]
pub fn classify_risk_score(score: u32) -> String {
    classification::classify(classification::clamp_score(score))
        .label()
        .to_string()
}
