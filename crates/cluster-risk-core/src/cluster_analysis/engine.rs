//! Cluster analysis entry points.
//!
//! `analyze_cluster` validates a raw batch once, then `analyze_records` runs
//! the pure pipeline: build the graph, run the four additive analyzers, apply
//! the dampener, clamp and classify. Nothing is kept between calls.

use serde::{Deserialize, Serialize};

use super::config::ClusterAnalysisConfig;
use super::cycles::detect_circular_flow;
use super::dampener::apply_legitimacy_dampener;
use super::density::detect_density_spikes;
use super::graph::EntityGraph;
use super::ingest::{ingest_records, TransactionRecordInput};
use super::isolation::detect_network_isolation;
use super::patterns::{Finding, PatternTag};
use super::repetition::detect_repetition;
use crate::risk_scoring::classification::{clamp_score, classify, RiskClassification};
use crate::types::{Points, TransactionRecord};
use crate::ClusterRiskResult;

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterAnalysisInput {
    pub records: Vec<TransactionRecordInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ClusterAnalysisConfig>,
}

/// Points contributed by each additive analyzer, before dampening.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointBreakdown {
    pub density_spike: Points,
    pub repetition: Points,
    pub circular_flow: Points,
    pub network_isolation: Points,
}

impl PointBreakdown {
    pub fn total(&self) -> Points {
        self.density_spike
            .saturating_add(self.repetition)
            .saturating_add(self.circular_flow)
            .saturating_add(self.network_isolation)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterAnalysis {
    /// Always within `[0, 100]`.
    pub cluster_risk_score: u32,
    pub classification: RiskClassification,
    /// First-seen order.
    pub entities_involved: Vec<String>,
    /// Detection order; the dampener tag, if any, is last.
    pub detected_patterns: Vec<PatternTag>,
    pub raw_points: Points,
    pub dampened_points: Points,
    pub point_breakdown: PointBreakdown,
    pub transaction_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Wire shape returned to callers: patterns rendered as tag strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterAnalysisResponse {
    pub cluster_risk_score: u32,
    pub classification: RiskClassification,
    pub entities_involved: Vec<String>,
    pub detected_patterns: Vec<String>,
}

impl ClusterAnalysis {
    pub fn to_response(&self) -> ClusterAnalysisResponse {
        ClusterAnalysisResponse {
            cluster_risk_score: self.cluster_risk_score,
            classification: self.classification,
            entities_involved: self.entities_involved.clone(),
            detected_patterns: self.detected_patterns.iter().map(ToString::to_string).collect(),
        }
    }

    /// Descriptions of the risk signals only; the dampener is not a finding.
    pub fn pattern_descriptions(&self) -> Vec<String> {
        self.detected_patterns
            .iter()
            .filter(|t| t.is_risk_signal())
            .map(PatternTag::describe)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Validate a raw batch and score it.
pub fn analyze_cluster(input: &ClusterAnalysisInput) -> ClusterRiskResult<ClusterAnalysis> {
    let config = input.config.clone().unwrap_or_default();
    config.validate()?;

    let batch = ingest_records(&input.records)?;
    let mut analysis = analyze_records(&batch.records, &config);
    analysis.warnings = batch.warnings;
    Ok(analysis)
}

/// Score already-validated records. Never fails.
pub fn analyze_records(
    records: &[TransactionRecord],
    config: &ClusterAnalysisConfig,
) -> ClusterAnalysis {
    let graph = EntityGraph::build(records);

    let density = detect_density_spikes(&graph, config);
    let repetition = detect_repetition(&graph, config);
    let circular = detect_circular_flow(&graph, config);
    let isolation = detect_network_isolation(&graph, config);

    let point_breakdown = PointBreakdown {
        density_spike: sum_points(&density),
        repetition: sum_points(&repetition),
        circular_flow: circular.as_ref().map_or(0, |f| f.points),
        network_isolation: isolation.as_ref().map_or(0, |f| f.points),
    };
    let raw_points = point_breakdown.total();

    let mut detected_patterns: Vec<PatternTag> = density
        .into_iter()
        .chain(repetition)
        .chain(circular)
        .chain(isolation)
        .map(|f| f.tag)
        .collect();

    let dampened_points = match apply_legitimacy_dampener(&graph, config, raw_points) {
        Some(d) => {
            detected_patterns.push(d.tag);
            d.points
        }
        None => raw_points,
    };

    let cluster_risk_score = clamp_score(dampened_points);
    let classification = classify(cluster_risk_score);
    let entities_involved: Vec<String> = graph.entities().map(str::to_string).collect();

    tracing::info!(
        records = records.len(),
        entities = entities_involved.len(),
        patterns = detected_patterns.len(),
        raw_points,
        score = cluster_risk_score,
        classification = classification.label(),
        "cluster analysed"
    );

    ClusterAnalysis {
        cluster_risk_score,
        classification,
        entities_involved,
        detected_patterns,
        raw_points,
        dampened_points,
        point_breakdown,
        transaction_count: records.len(),
        warnings: Vec::new(),
    }
}

fn sum_points(findings: &[Finding]) -> Points {
    findings
        .iter()
        .fold(0, |acc: Points, f| acc.saturating_add(f.points))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
