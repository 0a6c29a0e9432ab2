//! Bounded circular-flow search over small/medium transfers.
//!
//! Each start entity gets an explicit-stack depth-first search. A path never
//! revisits an entity already on it, so every explored path is simple and the
//! search terminates once paths reach `cycle_max_depth` entities. The whole
//! search stops at the first confirmed loop in the batch.

use super::config::ClusterAnalysisConfig;
use super::graph::EntityGraph;
use super::patterns::{Finding, PatternTag};

/// Return the first directed loop of at least `cycle_min_path_len` hops,
/// as a path that starts and ends at the same entity.
pub fn find_circular_path<'a>(
    graph: &EntityGraph<'a>,
    min_path_len: usize,
    max_depth: usize,
) -> Option<Vec<&'a str>> {
    let adjacency = &graph.layering_adjacency;

    for &start in adjacency.keys() {
        let mut stack: Vec<Vec<&'a str>> = vec![vec![start]];

        while let Some(path) = stack.pop() {
            let Some(&node) = path.last() else {
                continue;
            };
            let Some(neighbours) = adjacency.get(node) else {
                continue;
            };

            for &next in neighbours {
                if next == start {
                    if path.len() >= min_path_len {
                        let mut cycle = path.clone();
                        cycle.push(start);
                        return Some(cycle);
                    }
                    continue;
                }
                if path.len() < max_depth && !path.contains(&next) {
                    let mut extended = path.clone();
                    extended.push(next);
                    stack.push(extended);
                }
            }
        }
    }
    None
}

pub fn detect_circular_flow(
    graph: &EntityGraph<'_>,
    config: &ClusterAnalysisConfig,
) -> Option<Finding> {
    let path = find_circular_path(graph, config.cycle_min_path_len, config.cycle_max_depth)?;
    tracing::debug!(path = %path.join("→"), "circular flow");
    Some(Finding {
        tag: PatternTag::CircularFlow {
            path: path.into_iter().map(str::to_string).collect(),
        },
        points: config.cycle_points,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
