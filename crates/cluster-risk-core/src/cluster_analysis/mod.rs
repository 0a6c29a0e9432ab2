pub mod config;
pub mod cycles;
pub mod dampener;
pub mod density;
pub mod engine;
pub mod graph;
pub mod ingest;
pub mod isolation;
pub mod patterns;
pub mod repetition;

pub use config::ClusterAnalysisConfig;
pub use engine::{
    analyze_cluster, analyze_records, ClusterAnalysis, ClusterAnalysisInput,
    ClusterAnalysisResponse, PointBreakdown,
};
pub use graph::{EntityGraph, EntityPair};
pub use ingest::{ingest_records, parse_timestamp, TransactionRecordInput};
pub use patterns::{Finding, PatternTag};
