//! Grid stream header metadata

use crate::compression::CompressionMethod;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Grid stream format version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamVersion {
    pub major: u16,
    pub minor: u16,
}

impl StreamVersion {
    pub const CURRENT: Self = Self { major: 1, minor: 0 };

    pub fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    pub fn is_compatible(&self, other: &Self) -> bool {
        self.major == other.major
    }
}

impl Default for StreamVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

/// Header metadata for a grid stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamMetadata {
    /// Format version
    pub version: StreamVersion,

    /// Unique identifier of this stream
    pub uuid: Uuid,

    /// Compression method used for grid payloads
    pub compression: CompressionMethod,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Custom metadata key-value pairs
    pub custom_metadata: HashMap<String, String>,
}

impl StreamMetadata {
    /// Create new metadata with a fresh UUID
    pub fn new() -> Self {
        Self {
            version: StreamVersion::default(),
            uuid: Uuid::new_v4(),
            compression: CompressionMethod::Zstd,
            created_at: Utc::now(),
            custom_metadata: HashMap::new(),
        }
    }

    /// Set compression method
    pub fn with_compression(mut self, method: CompressionMethod) -> Self {
        self.compression = method;
        self
    }

    /// Add custom metadata
    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom_metadata.insert(key.into(), value.into());
    }

    /// Get custom metadata
    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.custom_metadata.get(key).map(|s| s.as_str())
    }
}

impl Default for StreamMetadata {
    fn default() -> Self {
        Self::new()
    }
}
