use thiserror::Error;

/// Errors that can occur during file storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No stored file exists under the given storage name.
    #[error("stored file not found: {0}")]
    NotFound(String),

    /// An I/O error occurred on the storage medium.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage name is not a plain filename.
    #[error("invalid storage name: {0}")]
    InvalidName(String),

    /// The file exceeds the configured size limit.
    #[error("file exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },
}
