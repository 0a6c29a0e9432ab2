//! Legitimacy dampener.
//!
//! Broad, diverse connectivity is typical of an operating business, so one
//! well-connected entity scales the batch's accumulated points down once,
//! after every additive analyzer has run.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::config::ClusterAnalysisConfig;
use super::graph::EntityGraph;
use super::patterns::PatternTag;
use crate::types::Points;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dampening {
    pub points: Points,
    pub tag: PatternTag,
}

/// Scale `points` by the dampener factor if any entity has more unique
/// neighbours than the configured minimum. Returns `None` when no entity
/// qualifies.
pub fn apply_legitimacy_dampener(
    graph: &EntityGraph<'_>,
    config: &ClusterAnalysisConfig,
    points: Points,
) -> Option<Dampening> {
    let (entity, connections) = graph
        .entities()
        .map(|entity| (entity, graph.degree(entity)))
        .find(|(_, n)| *n > config.dampener_min_connections)?;

    let scaled = (Decimal::from(points) * config.dampener_factor)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0);

    tracing::debug!(entity, connections, before = points, after = scaled, "legitimacy dampener");
    Some(Dampening {
        points: scaled,
        tag: PatternTag::LegitimacyDampenerApplied {
            entity: entity.to_string(),
            connections,
            factor: config.dampener_factor,
        },
    })
}
