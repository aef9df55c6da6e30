#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod key;
mod local;
mod s3;

use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use posecast_config::StorageConfig;

pub use error::{Result, StorageError};
pub use key::{bucket_url, normalize_key, public_url};
pub use local::LocalStore;
pub use s3::S3Store;

/// Destination for generated and uploaded media
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload the file at `local_path` under `key`, returning its public URL
    async fn upload(&self, local_path: &Path, key: &str) -> Result<String>;

    /// Backend name, for logs
    fn name(&self) -> &str;
}

/// Build the configured object store
pub async fn build_store(config: &StorageConfig) -> anyhow::Result<Arc<dyn ObjectStore>> {
    let store: Arc<dyn ObjectStore> = match config {
        StorageConfig::S3(s3) => Arc::new(S3Store::from_config(s3).await),
        StorageConfig::Local(local) => {
            std::fs::create_dir_all(&local.directory).map_err(|e| {
                anyhow::anyhow!("failed to create storage directory {}: {e}", local.directory.display())
            })?;
            Arc::new(LocalStore::new(local.directory.clone(), local.public_base_url.clone()))
        }
    };

    tracing::debug!(backend = store.name(), "object store initialized");

    Ok(store)
}
