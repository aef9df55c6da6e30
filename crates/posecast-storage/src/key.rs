use url::Url;

use crate::error::{Result, StorageError};

/// Normalize an object key: backslashes become slashes, leading slashes go
///
/// Keys that are empty or contain `.`/`..` segments are rejected so the local
/// backend can never write outside its directory.
pub fn normalize_key(key: &str) -> Result<String> {
    let normalized = key.replace('\\', "/");
    let normalized = normalized.trim_start_matches('/');

    let valid = !normalized.is_empty()
        && normalized
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..");

    if valid {
        Ok(normalized.to_owned())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

/// Public URL of `key` under `base`
pub fn public_url(base: &Url, key: &str) -> String {
    format!("{}/{key}", base.as_str().trim_end_matches('/'))
}

/// Virtual-hosted style S3 URL
pub fn bucket_url(bucket: &str, key: &str) -> String {
    format!("https://{bucket}.s3.amazonaws.com/{key}")
}
