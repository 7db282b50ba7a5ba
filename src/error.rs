//! Error types for the evserve crate

use thiserror::Error;

/// Result type alias for evserve operations
pub type Result<T> = std::result::Result<T, EvServeError>;

/// Main error type for the serving engine
#[derive(Error, Debug)]
pub enum EvServeError {
    #[error("Artifact error: {0}")]
    ArtifactError(String),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Inference error: {0}")]
    InferenceError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for EvServeError {
    fn from(err: serde_json::Error) -> Self {
        EvServeError::SerializationError(err.to_string())
    }
}

impl From<polars::error::PolarsError> for EvServeError {
    fn from(err: polars::error::PolarsError) -> Self {
        EvServeError::DataError(err.to_string())
    }
}
