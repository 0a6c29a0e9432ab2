pub mod classification;
pub mod weighted;

pub use classification::{classify, RiskClassification};
