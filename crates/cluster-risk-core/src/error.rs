use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClusterRiskError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ClusterRiskError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ClusterRiskError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ClusterRiskError {
    fn from(e: serde_json::Error) -> Self {
        ClusterRiskError::SerializationError(e.to_string())
    }
}
