use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Object storage backend
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Amazon S3 or an S3-compatible service
    S3(S3Config),
    /// Local directory served by some other process (development and tests)
    Local(LocalStorageConfig),
}

/// S3 configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct S3Config {
    /// Bucket receiving uploads
    pub bucket: String,
    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,
    /// Access key ID (optional, uses default credential chain if absent)
    #[serde(default)]
    pub access_key_id: Option<SecretString>,
    /// Secret access key
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,
    /// Endpoint override for S3-compatible services
    #[serde(default)]
    pub endpoint_url: Option<Url>,
    /// Public URL prefix; defaults to the virtual-hosted bucket URL
    #[serde(default)]
    pub public_base_url: Option<Url>,
}

/// Local directory storage configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalStorageConfig {
    /// Directory receiving copies of uploaded files
    pub directory: PathBuf,
    /// URL prefix under which `directory` is reachable
    pub public_base_url: Url,
}

fn default_region() -> String {
    "us-east-1".to_string()
}
