use clap::Args;
use serde_json::{json, Value};
use std::time::Instant;

use cluster_risk_core::cluster_analysis::{self, ClusterAnalysisInput};
use cluster_risk_core::with_metadata;

use crate::input;

const METHODOLOGY: &str =
    "Structural anomaly scoring (density, repetition, circular flow, isolation, dampener)";

/// Arguments for cluster analysis
#[derive(Args)]
pub struct AnalyzeClusterArgs {
    /// Path to JSON input file ({"records": [...], "config": {...}})
    #[arg(long)]
    pub input: Option<String>,

    /// Emit only score, classification, entities and pattern tags
    #[arg(long)]
    pub response_only: bool,
}

pub fn run_analyze_cluster(args: AnalyzeClusterArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cluster_input: ClusterAnalysisInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--input <file.json> or stdin required for cluster analysis".into());
    };

    let start = Instant::now();
    let analysis = cluster_analysis::analyze_cluster(&cluster_input)?;
    let elapsed = start.elapsed().as_micros() as u64;

    let config = cluster_input.config.clone().unwrap_or_default();
    let assumptions = json!({
        "config": config,
        "record_count": cluster_input.records.len(),
        "analyzed_count": analysis.transaction_count,
    });
    let warnings = analysis.warnings.clone();

    let output = if args.response_only {
        serde_json::to_value(with_metadata(
            METHODOLOGY,
            &assumptions,
            warnings,
            elapsed,
            analysis.to_response(),
        ))?
    } else {
        let mut result = serde_json::to_value(&analysis)?;
        result["pattern_descriptions"] = json!(analysis.pattern_descriptions());
        serde_json::to_value(with_metadata(
            METHODOLOGY,
            &assumptions,
            warnings,
            elapsed,
            result,
        ))?
    };
    Ok(output)
}
