use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::errors::ServiceError;

/// Backend for binary photo blobs addressed by relative name
/// (e.g. `user_images/3f1c....png`).
///
/// Implementations must be safe to share across request handlers.
#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Store `data` under `name`, replacing any previous blob with that name.
    async fn put(&self, name: &str, data: &[u8]) -> Result<(), ServiceError>;

    /// Read a blob; `Ok(None)` when it does not exist.
    async fn get(&self, name: &str) -> Result<Option<Vec<u8>>, ServiceError>;

    async fn exists(&self, name: &str) -> Result<bool, ServiceError>;

    /// Remove a blob. Returns `Ok(false)` when there was nothing to remove.
    async fn delete(&self, name: &str) -> Result<bool, ServiceError>;
}

/// Normalize a blob name, rejecting empty, absolute and `..` names.
pub fn validate_blob_name(name: &str) -> Result<PathBuf, ServiceError> {
    if name.is_empty() {
        return Err(ServiceError::Validation("blob name cannot be empty".into()));
    }
    let path = Path::new(name);
    if path.is_absolute() {
        return Err(ServiceError::Validation(format!("blob name cannot be absolute: {name}")));
    }

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ServiceError::Validation(format!("blob name escapes the media root: {name}")));
            }
        }
    }
    if normalized.as_os_str().is_empty() {
        return Err(ServiceError::Validation("blob name normalized to empty path".into()));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_nested_relative_names() {
        let p = validate_blob_name("./user_images/a.png").unwrap();
        assert_eq!(p, PathBuf::from("user_images/a.png"));
    }

    #[test]
    fn rejects_traversal_and_absolute() {
        assert!(validate_blob_name("../etc/passwd").is_err());
        assert!(validate_blob_name("user_images/../../x").is_err());
        assert!(validate_blob_name("/etc/passwd").is_err());
        assert!(validate_blob_name("").is_err());
        assert!(validate_blob_name(".").is_err());
    }
}
