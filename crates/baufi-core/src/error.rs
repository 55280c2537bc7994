use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BaufiError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(Uuid),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for BaufiError {
    fn from(e: serde_json::Error) -> Self {
        BaufiError::SerializationError(e.to_string())
    }
}
