//! Error types for the partner summary pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the partner summary pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source relation missing or unreadable.
    #[error("Data source error: {0}")]
    DataSource(String),

    /// Expected column absent or malformed in an intermediate result.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Destination write failure.
    #[error("Write error: {0}")]
    Write(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a data source error.
    pub fn data_source(msg: impl Into<String>) -> Self {
        Error::DataSource(msg.into())
    }

    /// Create a schema error.
    pub fn schema(msg: impl Into<String>) -> Self {
        Error::Schema(msg.into())
    }

    /// Create a write error.
    pub fn write(msg: impl Into<String>) -> Self {
        Error::Write(msg.into())
    }
}
