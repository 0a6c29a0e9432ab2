//! Micro-transaction density spikes.
//!
//! A pair spikes when some rolling window starting at one of its small-bucket
//! transfers holds at least `multiplier` times the batch's average number of
//! small transfers per pair.

use chrono::Duration;

use super::config::ClusterAnalysisConfig;
use super::graph::EntityGraph;
use super::patterns::{Finding, PatternTag};

pub fn detect_density_spikes(
    graph: &EntityGraph<'_>,
    config: &ClusterAnalysisConfig,
) -> Vec<Finding> {
    let pair_count = graph.small_timestamps.len() as u64;
    if pair_count == 0 {
        return Vec::new();
    }
    let total_small: u64 = graph
        .small_timestamps
        .iter()
        .map(|(_, stamps)| stamps.len() as u64)
        .sum();
    let multiplier = u64::from(config.density_multiplier);
    let window = Duration::hours(config.density_window_hours);

    let mut findings = Vec::new();
    for (pair, stamps) in graph.small_timestamps.iter() {
        let mut sorted = stamps.clone();
        sorted.sort_unstable();

        for &start in &sorted {
            let lo = sorted.partition_point(|t| *t < start);
            let hi = match start.checked_add_signed(window) {
                Some(end) => sorted.partition_point(|t| *t <= end),
                None => sorted.len(),
            };
            let in_window = (hi - lo) as u64;

            // in_window >= (total_small / pair_count) * multiplier, kept in integers
            if in_window * pair_count >= total_small * multiplier {
                tracing::debug!(
                    sender = pair.sender,
                    receiver = pair.receiver,
                    in_window,
                    total_small,
                    pair_count,
                    "density spike"
                );
                findings.push(Finding {
                    tag: PatternTag::DensitySpike {
                        pair: pair.to_owned_pair(),
                        window_count: in_window as u32,
                    },
                    points: config.density_points,
                });
                break;
            }
        }
    }
    findings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AmountBucket, TransactionPurpose, TransactionRecord};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn rec(s: &str, r: &str, bucket: AmountBucket, ts: DateTime<Utc>) -> TransactionRecord {
        TransactionRecord {
            sender: s.into(),
            receiver: r.into(),
            amount_bucket: bucket,
            timestamp: ts,
            purpose: TransactionPurpose::Unknown,
        }
    }

    /// Six small A→B transfers within a day plus five single-transfer pairs:
    /// avg = 11/6, threshold = 5.5, window count = 6.
    fn spike_batch() -> Vec<TransactionRecord> {
        let mut records: Vec<TransactionRecord> = (0..6)
            .map(|h| rec("A", "B", AmountBucket::Small, at(15, 8 + h)))
            .collect();
        for (s, r) in [("C", "D"), ("D", "E"), ("E", "F"), ("F", "G"), ("G", "H")] {
            records.push(rec(s, r, AmountBucket::Small, at(15, 9)));
        }
        records
    }

    #[test]
    fn test_spike_detected() {
        let records = spike_batch();
        let g = EntityGraph::build(&records);
        let findings = detect_density_spikes(&g, &ClusterAnalysisConfig::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].points, 40);
        assert_eq!(findings[0].tag.to_string(), "density_spike:A→B");
    }

    #[test]
    fn test_single_pair_never_spikes() {
        // With one pair the average equals its own count, so 3x is unreachable.
        let records: Vec<TransactionRecord> = (0..8)
            .map(|h| rec("A", "B", AmountBucket::Small, at(15, h)))
            .collect();
        let g = EntityGraph::build(&records);
        assert!(detect_density_spikes(&g, &ClusterAnalysisConfig::default()).is_empty());
    }

    #[test]
    fn test_spread_out_transfers_do_not_spike() {
        // Same counts as spike_batch but one A→B transfer per day.
        let mut records: Vec<TransactionRecord> = (0..6)
            .map(|d| rec("A", "B", AmountBucket::Small, at(1 + d * 2, 8)))
            .collect();
        for (s, r) in [("C", "D"), ("D", "E"), ("E", "F"), ("F", "G"), ("G", "H")] {
            records.push(rec(s, r, AmountBucket::Small, at(15, 9)));
        }
        let g = EntityGraph::build(&records);
        assert!(detect_density_spikes(&g, &ClusterAnalysisConfig::default()).is_empty());
    }

    #[test]
    fn test_window_inclusive_of_end() {
        // Exactly 24h apart still counts as one window.
        let mut records = vec![
            rec("A", "B", AmountBucket::Small, at(15, 0)),
            rec("A", "B", AmountBucket::Small, at(15, 12)),
            rec("A", "B", AmountBucket::Small, at(16, 0)),
        ];
        // avg = (3 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1) / 9 = 11/9, threshold ~3.67
        // so the three-transfer window does not fire...
        for (s, r) in [
            ("C", "D"),
            ("D", "E"),
            ("E", "F"),
            ("F", "G"),
            ("G", "H"),
            ("H", "I"),
            ("I", "J"),
            ("J", "K"),
        ] {
            records.push(rec(s, r, AmountBucket::Small, at(15, 9)));
        }
        let g = EntityGraph::build(&records);
        assert!(detect_density_spikes(&g, &ClusterAnalysisConfig::default()).is_empty());

        // ...but with a multiplier of 2 (threshold ~2.44) it does.
        let cfg = ClusterAnalysisConfig {
            density_multiplier: 2,
            ..Default::default()
        };
        let findings = detect_density_spikes(&g, &cfg);
        assert_eq!(findings.len(), 1);
        match &findings[0].tag {
            PatternTag::DensitySpike { window_count, .. } => assert_eq!(*window_count, 3),
            other => panic!("unexpected tag {other:?}"),
        }
    }

    #[test]
    fn test_window_excludes_past_end() {
        let mut records = vec![
            rec("A", "B", AmountBucket::Small, at(15, 0)),
            rec("A", "B", AmountBucket::Small, at(15, 12)),
            rec(
                "A",
                "B",
                AmountBucket::Small,
                at(16, 0) + Duration::seconds(1),
            ),
        ];
        for (s, r) in [("C", "D"), ("D", "E"), ("E", "F"), ("F", "G"), ("G", "H")] {
            records.push(rec(s, r, AmountBucket::Small, at(15, 9)));
        }
        // avg = 8/6, multiplier 2 => threshold 2.67; best window holds only 2
        let cfg = ClusterAnalysisConfig {
            density_multiplier: 2,
            ..Default::default()
        };
        let g = EntityGraph::build(&records);
        assert!(detect_density_spikes(&g, &cfg).is_empty());
    }

    #[test]
    fn test_non_small_ignored() {
        let mut records = spike_batch();
        for r in records.iter_mut().filter(|r| r.sender == "A") {
            r.amount_bucket = AmountBucket::Medium;
        }
        let g = EntityGraph::build(&records);
        assert!(detect_density_spikes(&g, &ClusterAnalysisConfig::default()).is_empty());
    }

    #[test]
    fn test_unsorted_input_handled() {
        let mut records = spike_batch();
        records.reverse();
        let g = EntityGraph::build(&records);
        assert_eq!(
            detect_density_spikes(&g, &ClusterAnalysisConfig::default()).len(),
            1
        );
    }

    #[test]
    fn test_no_small_transfers() {
        let records = vec![
            rec("A", "B", AmountBucket::Large, at(15, 1)),
            rec("B", "C", AmountBucket::Large, at(15, 2)),
        ];
        let g = EntityGraph::build(&records);
        assert!(detect_density_spikes(&g, &ClusterAnalysisConfig::default()).is_empty());
    }
}
