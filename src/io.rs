//! Grid loading from storage
//!
//! The node evaluation layer only knows the [`GridLoader`] seam; the
//! stream format behind it stays opaque to callers.

use crate::error::{Result, VdbError};
use crate::grid::GridCollection;
use crate::stream;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Trait for loading grid collections from a resolved path
#[async_trait]
pub trait GridLoader: Send + Sync {
    /// Load every grid the stream at `path` contains, in stream order.
    async fn load(&self, path: &str) -> Result<GridCollection>;
}

/// Loader that reads grid streams from the local filesystem
#[derive(Debug, Default)]
pub struct FileGridLoader;

impl FileGridLoader {
    pub fn new() -> Self {
        Self
    }

    /// Open `path` for binary reading and return the full byte stream.
    ///
    /// A path that cannot be opened is the explicit unreadable-file
    /// failure; it is reported once and never retried.
    async fn read_bytes(&self, path: &str) -> Result<Bytes> {
        let mut file = fs::File::open(Path::new(path))
            .await
            .map_err(|_| VdbError::Unreadable(path.to_string()))?;

        let mut data = Vec::new();
        file.read_to_end(&mut data).await.map_err(VdbError::Io)?;
        Ok(Bytes::from(data))
    }
}

#[async_trait]
impl GridLoader for FileGridLoader {
    async fn load(&self, path: &str) -> Result<GridCollection> {
        let data = self.read_bytes(path).await?;
        stream::read_grids(&data)
    }
}
