use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::blob_store::{validate_blob_name, BlobStore};
use crate::errors::ServiceError;

/// In-process blob store used by tests and throwaway instances.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self { Self::default() }

    /// Names of all stored blobs, sorted.
    pub async fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.blobs.read().await.keys().cloned().collect();
        names.sort();
        names
    }
}

fn key(name: &str) -> Result<String, ServiceError> {
    Ok(validate_blob_name(name)?.to_string_lossy().replace('\\', "/"))
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, name: &str, data: &[u8]) -> Result<(), ServiceError> {
        let k = key(name)?;
        self.blobs.write().await.insert(k, data.to_vec());
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<Vec<u8>>, ServiceError> {
        let k = key(name)?;
        Ok(self.blobs.read().await.get(&k).cloned())
    }

    async fn exists(&self, name: &str) -> Result<bool, ServiceError> {
        let k = key(name)?;
        Ok(self.blobs.read().await.contains_key(&k))
    }

    async fn delete(&self, name: &str) -> Result<bool, ServiceError> {
        let k = key(name)?;
        Ok(self.blobs.write().await.remove(&k).is_some())
    }
}
