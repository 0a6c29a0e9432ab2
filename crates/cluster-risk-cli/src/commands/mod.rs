pub mod cluster;
pub mod risk_scoring;
