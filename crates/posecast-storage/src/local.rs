use std::path::{Path, PathBuf};

use async_trait::async_trait;
use url::Url;

use crate::{
    ObjectStore,
    error::{Result, StorageError},
    key::{normalize_key, public_url},
};

/// Store that copies files into a local directory
pub struct LocalStore {
    directory: PathBuf,
    public_base_url: Url,
}

impl LocalStore {
    pub const fn new(directory: PathBuf, public_base_url: Url) -> Self {
        Self {
            directory,
            public_base_url,
        }
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn upload(&self, local_path: &Path, key: &str) -> Result<String> {
        let key = normalize_key(key)?;
        let destination = self.directory.join(&key);

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| StorageError::Upload {
                key: key.clone(),
                message: e.to_string(),
            })?;
        }

        tokio::fs::copy(local_path, &destination).await.map_err(|e| {
            if local_path.exists() {
                StorageError::Upload {
                    key: key.clone(),
                    message: e.to_string(),
                }
            } else {
                StorageError::Read {
                    path: local_path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        tracing::debug!(key, destination = %destination.display(), "stored file locally");

        Ok(public_url(&self.public_base_url, &key))
    }

    fn name(&self) -> &str {
        "local"
    }
}
