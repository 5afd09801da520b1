use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::blob_store::{validate_blob_name, BlobStore};
use crate::errors::ServiceError;

/// Blob store rooted at the configured media directory.
#[derive(Clone, Debug)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Open the store, creating `root` if needed.
    pub async fn open<P: Into<PathBuf>>(root: P) -> Result<Self, ServiceError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot create {}: {e}", root.display())))?;
        Ok(Self { root })
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, ServiceError> {
        Ok(self.root.join(validate_blob_name(name)?))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, name: &str, data: &[u8]) -> Result<(), ServiceError> {
        let path = self.path_for(name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Storage(format!("cannot create {}: {e}", parent.display())))?;
        }
        fs::write(&path, data)
            .await
            .map_err(|e| ServiceError::Storage(format!("write {name}: {e}")))?;
        debug!(blob = %name, size = data.len(), "blob_written");
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<Vec<u8>>, ServiceError> {
        let path = self.path_for(name)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ServiceError::Storage(format!("read {name}: {e}"))),
        }
    }

    async fn exists(&self, name: &str) -> Result<bool, ServiceError> {
        let path = self.path_for(name)?;
        fs::try_exists(&path)
            .await
            .map_err(|e| ServiceError::Storage(format!("stat {name}: {e}")))
    }

    async fn delete(&self, name: &str) -> Result<bool, ServiceError> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ServiceError::Storage(format!("delete {name}: {e}"))),
        }
    }
}
