use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Name-addressed blob storage for uploaded files.
///
/// Callers own name generation; the store treats names as opaque flat keys.
/// Writing to an existing name replaces its content.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store bytes under the given name, returning the number of bytes written.
    async fn put(&self, name: &str, data: &[u8]) -> Result<u64, StorageError>;

    /// Retrieve all bytes stored under the given name.
    async fn get(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.get_stream(name).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Retrieve a stored file as a streaming async reader.
    async fn get_stream(&self, name: &str) -> Result<BoxReader, StorageError>;

    /// Check whether a file is stored under the given name.
    async fn exists(&self, name: &str) -> Result<bool, StorageError>;

    /// Delete the file stored under the given name.
    ///
    /// Returns `true` if a file was deleted, `false` if none existed.
    async fn delete(&self, name: &str) -> Result<bool, StorageError>;

    /// Get the size of a stored file in bytes.
    async fn size(&self, name: &str) -> Result<u64, StorageError>;
}
