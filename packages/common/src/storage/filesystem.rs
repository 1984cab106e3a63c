use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::BufReader;

use super::error::StorageError;
use super::traits::{BoxReader, FileStore};

/// Filesystem-backed file store.
///
/// Files live flat under `base_path`, keyed by their storage name. Writes go
/// through a temp file in `.tmp/` followed by a rename, so a stored file is
/// never observable half-written. A rename onto an existing name replaces it.
pub struct FilesystemFileStore {
    base_path: PathBuf,
    max_size: u64,
}

impl FilesystemFileStore {
    /// Create a new filesystem file store rooted at `base_path`.
    pub async fn new(base_path: PathBuf, max_size: u64) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self {
            base_path,
            max_size,
        })
    }

    /// Resolve a storage name to its on-disk path.
    ///
    /// Names must be plain filenames: no separators, no traversal, no leading
    /// dot (which would collide with the `.tmp/` namespace).
    fn entry_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name.contains('\0')
            || name.starts_with('.')
        {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.base_path.join(name))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl FileStore for FilesystemFileStore {
    async fn put(&self, name: &str, data: &[u8]) -> Result<u64, StorageError> {
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let entry_path = self.entry_path(name)?;
        let temp_path = self.temp_path();

        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &entry_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(data.len() as u64)
    }

    async fn get_stream(&self, name: &str) -> Result<BoxReader, StorageError> {
        let entry_path = self.entry_path(name)?;
        match fs::File::open(&entry_path).await {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, name: &str) -> Result<bool, StorageError> {
        let entry_path = self.entry_path(name)?;
        Ok(fs::try_exists(&entry_path).await?)
    }

    async fn delete(&self, name: &str) -> Result<bool, StorageError> {
        let entry_path = self.entry_path(name)?;
        match fs::remove_file(&entry_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn size(&self, name: &str) -> Result<u64, StorageError> {
        let entry_path = self.entry_path(name)?;
        match fs::metadata(&entry_path).await {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
