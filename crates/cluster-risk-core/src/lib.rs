pub mod error;
pub mod types;

#[cfg(feature = "risk_scoring")]
pub mod risk_scoring;

#[cfg(feature = "cluster_analysis")]
pub mod cluster_analysis;

pub use error::ClusterRiskError;
pub use types::*;

/// Standard result type for all cluster-risk operations
pub type ClusterRiskResult<T> = Result<T, ClusterRiskError>;
