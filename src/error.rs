//! Error types for grid reading and node evaluation

use thiserror::Error;

/// Main error type for vdbread operations
#[derive(Error, Debug)]
pub enum VdbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid grid stream: {0}")]
    InvalidFormat(String),

    #[error("Unsupported stream version: {0}.{1}")]
    UnsupportedVersion(u16, u16),

    #[error("Compression error: {0}")]
    Compression(String),

    #[error("Decompression error: {0}")]
    Decompression(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Attribute read failed: {0}")]
    AttributeRead(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Unreadable file: {0}")]
    Unreadable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),
}

/// Specialized Result type for vdbread operations
pub type Result<T> = std::result::Result<T, VdbError>;

impl From<bincode::Error> for VdbError {
    fn from(err: bincode::Error) -> Self {
        VdbError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for VdbError {
    fn from(err: serde_json::Error) -> Self {
        VdbError::Serialization(err.to_string())
    }
}
