//! Closed-group (network isolation) check.
//!
//! Counts transfers whose sender and receiver both belong to the batch's own
//! entity set. Because that set is derived from the same batch, every
//! well-formed batch is fully internal and the check reduces to the entity
//! count threshold. It stays a membership test so a wider reference universe
//! can be swapped in without touching the scoring.

use rust_decimal::Decimal;

use super::config::ClusterAnalysisConfig;
use super::graph::EntityGraph;
use super::patterns::{Finding, PatternTag};

pub fn detect_network_isolation(
    graph: &EntityGraph<'_>,
    config: &ClusterAnalysisConfig,
) -> Option<Finding> {
    let entity_count = graph.entity_count();
    let total = graph.transaction_count();
    if entity_count < config.isolation_min_entities || total == 0 {
        return None;
    }

    let internal = graph
        .edges
        .iter()
        .filter(|e| graph.contains_entity(e.from) && graph.contains_entity(e.to))
        .count();

    if Decimal::from(internal) <= config.isolation_ratio * Decimal::from(total) {
        return None;
    }

    tracing::debug!(internal, total, entity_count, "network isolation");
    Some(Finding {
        tag: PatternTag::NetworkIsolation {
            internal_transactions: internal,
            total_transactions: total,
            entity_count,
        },
        points: config.isolation_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AmountBucket, TransactionPurpose, TransactionRecord};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn rec(s: &str, r: &str) -> TransactionRecord {
        TransactionRecord {
            sender: s.into(),
            receiver: r.into(),
            amount_bucket: AmountBucket::Large,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap(),
            purpose: TransactionPurpose::Contract,
        }
    }

    #[test]
    fn test_three_entities_fire() {
        let records = vec![rec("A", "B"), rec("B", "C")];
        let g = EntityGraph::build(&records);
        let finding = detect_network_isolation(&g, &ClusterAnalysisConfig::default()).unwrap();
        assert_eq!(finding.points, 30);
        assert_eq!(finding.tag.to_string(), "network_isolation");
    }

    #[test]
    fn test_two_entities_do_not_fire() {
        let records = vec![rec("A", "B"), rec("B", "A"), rec("A", "B")];
        let g = EntityGraph::build(&records);
        assert!(detect_network_isolation(&g, &ClusterAnalysisConfig::default()).is_none());
    }

    #[test]
    fn test_ratio_is_strictly_greater() {
        // A ratio threshold of 1 can never be exceeded by a self-contained batch.
        let records = vec![rec("A", "B"), rec("B", "C")];
        let g = EntityGraph::build(&records);
        let cfg = ClusterAnalysisConfig {
            isolation_ratio: dec!(1),
            ..Default::default()
        };
        assert!(detect_network_isolation(&g, &cfg).is_none());
    }

    #[test]
    fn test_payload_counts() {
        let records = vec![rec("A", "B"), rec("B", "C"), rec("C", "D")];
        let g = EntityGraph::build(&records);
        match detect_network_isolation(&g, &ClusterAnalysisConfig::default())
            .unwrap()
            .tag
        {
            PatternTag::NetworkIsolation {
                internal_transactions,
                total_transactions,
                entity_count,
            } => {
                assert_eq!(internal_transactions, 3);
                assert_eq!(total_transactions, 3);
                assert_eq!(entity_count, 4);
            }
            other => panic!("unexpected tag {other:?}"),
        }
    }
}
