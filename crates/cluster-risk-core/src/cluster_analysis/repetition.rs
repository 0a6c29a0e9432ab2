//! Same-bucket repetition between one ordered pair.

use super::config::ClusterAnalysisConfig;
use super::graph::EntityGraph;
use super::patterns::{Finding, PatternTag};

/// Flag pairs whose count in any single bucket exceeds the threshold.
/// Each pair contributes at most once, for its first qualifying bucket.
pub fn detect_repetition(graph: &EntityGraph<'_>, config: &ClusterAnalysisConfig) -> Vec<Finding> {
    graph
        .bucket_counts
        .iter()
        .filter_map(|(pair, counts)| {
            let &(bucket, count) = counts
                .iter()
                .find(|(_, count)| *count > config.repetition_threshold)?;
            tracing::debug!(
                sender = pair.sender,
                receiver = pair.receiver,
                bucket = bucket.as_str(),
                count,
                "repetition"
            );
            Some(Finding {
                tag: PatternTag::Repetition {
                    pair: pair.to_owned_pair(),
                    bucket,
                    count,
                },
                points: config.repetition_points,
            })
        })
        .collect()
}
