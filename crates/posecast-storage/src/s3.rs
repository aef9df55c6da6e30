use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::{Client, error::DisplayErrorContext, primitives::ByteStream};
use posecast_config::S3Config;
use secrecy::ExposeSecret;
use url::Url;

use crate::{
    ObjectStore,
    error::{Result, StorageError},
    key::{bucket_url, normalize_key, public_url},
};

/// Amazon S3 (or S3-compatible) store
pub struct S3Store {
    client: Client,
    bucket: String,
    public_base_url: Option<Url>,
}

impl S3Store {
    /// Build an S3 client from configuration
    ///
    /// Static credentials are used when both halves are set; otherwise the
    /// default AWS credential chain applies. An endpoint override switches to
    /// path-style addressing, which S3-compatible services expect.
    pub async fn from_config(config: &S3Config) -> Self {
        let mut aws_config_builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let (Some(access_key), Some(secret_key)) = (&config.access_key_id, &config.secret_access_key) {
            let credentials = aws_credential_types::Credentials::new(
                access_key.expose_secret(),
                secret_key.expose_secret(),
                None,
                None,
                "posecast-config",
            );
            aws_config_builder = aws_config_builder.credentials_provider(credentials);
        }

        let sdk_config = aws_config_builder.load().await;
        let mut s3_config = aws_sdk_s3::config::Builder::from(&sdk_config);

        if let Some(endpoint) = &config.endpoint_url {
            s3_config = s3_config
                .endpoint_url(endpoint.as_str().trim_end_matches('/'))
                .force_path_style(true);
        }

        Self {
            client: Client::from_conf(s3_config.build()),
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.clone(),
        }
    }

    fn url_for(&self, key: &str) -> String {
        self.public_base_url
            .as_ref()
            .map_or_else(|| bucket_url(&self.bucket, key), |base| public_url(base, key))
    }
}

fn content_type(key: &str) -> &'static str {
    match key.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()).as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("mp4") => "video/mp4",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn upload(&self, local_path: &Path, key: &str) -> Result<String> {
        let key = normalize_key(key)?;

        let body = ByteStream::from_path(local_path).await.map_err(|e| StorageError::Read {
            path: local_path.display().to_string(),
            message: e.to_string(),
        })?;

        // PutObject overwrites any existing object under the key
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type(&key))
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(bucket = %self.bucket, key, error = %DisplayErrorContext(&e), "S3 upload failed");
                StorageError::Upload {
                    key: key.clone(),
                    message: DisplayErrorContext(&e).to_string(),
                }
            })?;

        tracing::debug!(bucket = %self.bucket, key, "uploaded object");

        Ok(self.url_for(&key))
    }

    fn name(&self) -> &str {
        "s3"
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use super::*;

    fn config(endpoint: Option<&str>, public_base_url: Option<&str>) -> S3Config {
        S3Config {
            bucket: "test-bucket-aws-mine".to_owned(),
            region: "us-east-1".to_owned(),
            access_key_id: Some("AKIDEXAMPLE".to_owned().into()),
            secret_access_key: Some("secret".to_owned().into()),
            endpoint_url: endpoint.map(|e| Url::parse(e).unwrap()),
            public_base_url: public_base_url.map(|u| Url::parse(u).unwrap()),
        }
    }

    #[test]
    fn content_types_follow_extension() {
        assert_eq!(content_type("audio/a.mp3"), "audio/mpeg");
        assert_eq!(content_type("uploads/a.JPG"), "image/jpeg");
        assert_eq!(content_type("README"), "application/octet-stream");
    }

    #[tokio::test]
    async fn default_url_is_virtual_hosted() {
        let store = S3Store::from_config(&config(None, None)).await;
        assert_eq!(
            store.url_for("audio/a.mp3"),
            "https://test-bucket-aws-mine.s3.amazonaws.com/audio/a.mp3"
        );
    }

    #[tokio::test]
    async fn puts_object_at_endpoint() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.mp3");
        std::fs::write(&file, b"audio").unwrap();

        Mock::given(method("PUT"))
            .and(path("/test-bucket-aws-mine/audio/a.mp3"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let store = S3Store::from_config(&config(Some(&server.uri()), Some("https://cdn.example.com"))).await;
        let url = store.upload(&file, r"audio\a.mp3").await.unwrap();

        assert_eq!(url, "https://cdn.example.com/audio/a.mp3");
    }

    #[tokio::test]
    async fn rejected_upload_is_a_storage_error() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.mp3");
        std::fs::write(&file, b"audio").unwrap();

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(403).set_body_string(
                "<Error><Code>AccessDenied</Code><Message>Access Denied</Message></Error>",
            ))
            .mount(&server)
            .await;

        let store = S3Store::from_config(&config(Some(&server.uri()), None)).await;
        let err = store.upload(&file, "audio/a.mp3").await.unwrap_err();

        assert!(matches!(err, StorageError::Upload { ref key, .. } if key == "audio/a.mp3"));
    }
}
