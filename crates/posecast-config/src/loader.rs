use std::path::Path;

use secrecy::ExposeSecret;

use crate::{Config, StorageConfig, parse_duration};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if a duration does not parse or a collaborator
    /// section is incomplete
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_tts_config()?;
        self.validate_imagegen_config()?;
        self.validate_storage_config()?;
        self.validate_video_config()?;
        Ok(())
    }

    fn validate_tts_config(&self) -> anyhow::Result<()> {
        let timeout = parse_duration(&self.tts.stream_timeout)
            .map_err(|e| anyhow::anyhow!("tts.stream_timeout: {e}"))?;

        if timeout.is_zero() {
            anyhow::bail!("tts.stream_timeout must be greater than zero");
        }

        if self.tts.max_audio_bytes == Some(0) {
            anyhow::bail!("tts.max_audio_bytes must be greater than zero when set");
        }

        Ok(())
    }

    fn validate_imagegen_config(&self) -> anyhow::Result<()> {
        let Some(transform) = self.imagegen.as_ref().and_then(|imagegen| imagegen.transform.as_ref()) else {
            return Ok(());
        };

        if transform.reference_images.len() != 2 {
            anyhow::bail!(
                "imagegen.transform.reference_images must list exactly 2 images, found {}",
                transform.reference_images.len()
            );
        }

        Ok(())
    }

    fn validate_storage_config(&self) -> anyhow::Result<()> {
        let Some(StorageConfig::S3(ref s3)) = self.storage else {
            return Ok(());
        };

        if s3.bucket.trim().is_empty() {
            anyhow::bail!("storage.bucket must not be empty");
        }

        match (&s3.access_key_id, &s3.secret_access_key) {
            (Some(id), Some(secret)) if id.expose_secret().is_empty() || secret.expose_secret().is_empty() => {
                anyhow::bail!("storage credentials must not be empty when set")
            }
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("storage.access_key_id and storage.secret_access_key must be set together")
            }
            _ => Ok(()),
        }
    }

    fn validate_video_config(&self) -> anyhow::Result<()> {
        let Some(ref video) = self.video else {
            return Ok(());
        };

        let poll_interval =
            parse_duration(&video.poll_interval).map_err(|e| anyhow::anyhow!("video.poll_interval: {e}"))?;
        let max_wait = parse_duration(&video.max_wait).map_err(|e| anyhow::anyhow!("video.max_wait: {e}"))?;

        if poll_interval.is_zero() {
            anyhow::bail!("video.poll_interval must be greater than zero");
        }

        if max_wait < poll_interval {
            anyhow::bail!("video.max_wait must not be shorter than video.poll_interval");
        }

        Ok(())
    }
}
