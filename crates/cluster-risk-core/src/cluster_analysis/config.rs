use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Points, Weight};
use crate::{ClusterRiskError, ClusterRiskResult};

/// Ten years; keeps window arithmetic far from `chrono`'s limits.
const MAX_WINDOW_HOURS: i64 = 87_600;

/// Deepest cycle search accepted from callers. The search is exponential in
/// depth over dense graphs, so this is a hard ceiling.
pub const MAX_CYCLE_DEPTH: usize = 6;

/// Tunable thresholds and point awards for the structural analyzers.
///
/// Every field falls back to its default when omitted from JSON, so callers
/// only spell out the knobs they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterAnalysisConfig {
    /// A window is a spike when its count reaches `avg * multiplier`.
    pub density_multiplier: u32,
    pub density_window_hours: i64,
    pub density_points: Points,
    /// Repetition fires when a bucket count is strictly greater than this.
    pub repetition_threshold: u32,
    pub repetition_points: Points,
    /// Minimum path length (entities, start included) before closing a loop.
    pub cycle_min_path_len: usize,
    /// Longest path explored, in entities, start included.
    pub cycle_max_depth: usize,
    pub cycle_points: Points,
    /// Isolation fires when the internal ratio is strictly greater than this.
    pub isolation_ratio: Weight,
    pub isolation_min_entities: usize,
    pub isolation_points: Points,
    /// Dampener fires when an entity has strictly more neighbours than this.
    pub dampener_min_connections: usize,
    pub dampener_factor: Weight,
}

impl Default for ClusterAnalysisConfig {
    fn default() -> Self {
        ClusterAnalysisConfig {
            density_multiplier: 3,
            density_window_hours: 24,
            density_points: 40,
            repetition_threshold: 10,
            repetition_points: 25,
            cycle_min_path_len: 3,
            cycle_max_depth: 6,
            cycle_points: 60,
            isolation_ratio: dec!(0.8),
            isolation_min_entities: 3,
            isolation_points: 30,
            dampener_min_connections: 6,
            dampener_factor: dec!(0.7),
        }
    }
}

impl ClusterAnalysisConfig {
    pub fn validate(&self) -> ClusterRiskResult<()> {
        if self.density_multiplier == 0 {
            return Err(ClusterRiskError::invalid(
                "config.density_multiplier",
                "Must be at least 1",
            ));
        }
        if self.density_window_hours <= 0 || self.density_window_hours > MAX_WINDOW_HOURS {
            return Err(ClusterRiskError::invalid(
                "config.density_window_hours",
                format!("Window must be between 1 and {MAX_WINDOW_HOURS} hours"),
            ));
        }
        if self.cycle_min_path_len < 2 {
            return Err(ClusterRiskError::invalid(
                "config.cycle_min_path_len",
                "A loop needs at least 2 entities",
            ));
        }
        if self.cycle_max_depth > MAX_CYCLE_DEPTH {
            return Err(ClusterRiskError::invalid(
                "config.cycle_max_depth",
                format!("Must not exceed {MAX_CYCLE_DEPTH}"),
            ));
        }
        if self.cycle_max_depth < self.cycle_min_path_len {
            return Err(ClusterRiskError::invalid(
                "config.cycle_max_depth",
                "Must not be smaller than cycle_min_path_len",
            ));
        }
        if self.isolation_ratio < Decimal::ZERO || self.isolation_ratio > Decimal::ONE {
            return Err(ClusterRiskError::invalid(
                "config.isolation_ratio",
                "Must be between 0 and 1",
            ));
        }
        if self.dampener_factor < Decimal::ZERO || self.dampener_factor > Decimal::ONE {
            return Err(ClusterRiskError::invalid(
                "config.dampener_factor",
                "Must be between 0 and 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        assert!(ClusterAnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: ClusterAnalysisConfig =
            serde_json::from_str(r#"{"cycle_points": 50}"#).unwrap();
        assert_eq!(cfg.cycle_points, 50);
        assert_eq!(cfg.density_points, 40);
        assert_eq!(cfg.dampener_factor, dec!(0.7));
    }

    #[test]
    fn test_depth_below_min_path_rejected() {
        let cfg = ClusterAnalysisConfig {
            cycle_max_depth: 2,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_depth_above_cap_rejected() {
        let cfg = ClusterAnalysisConfig {
            cycle_max_depth: 1_000_000,
            ..Default::default()
        };
        match cfg.validate() {
            Err(ClusterRiskError::InvalidInput { field, .. }) => {
                assert_eq!(field, "config.cycle_max_depth")
            }
            other => panic!("unexpected result {other:?}"),
        }

        let at_cap = ClusterAnalysisConfig {
            cycle_max_depth: MAX_CYCLE_DEPTH,
            ..Default::default()
        };
        assert!(at_cap.validate().is_ok());
    }

    #[test]
    fn test_factor_out_of_range_rejected() {
        let cfg = ClusterAnalysisConfig {
            dampener_factor: dec!(1.5),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_window_rejected() {
        let cfg = ClusterAnalysisConfig {
            density_window_hours: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
