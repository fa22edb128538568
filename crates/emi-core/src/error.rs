use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmiCoreError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for EmiCoreError {
    fn from(e: serde_json::Error) -> Self {
        EmiCoreError::SerializationError(e.to_string())
    }
}
