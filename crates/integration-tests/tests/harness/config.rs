//! Programmatic configuration builder for integration tests

use std::{net::SocketAddr, path::Path};

use posecast_config::{
    Config, HealthConfig, ImageGenConfig, ImageGenProviderType, LlmConfig, LlmProviderType, LocalStorageConfig,
    ServerConfig, StorageConfig, TransformConfig, TtsConfig, VideoConfig, VideoProviderType,
};
use secrecy::SecretString;

pub const TEST_KEY: &str = "test-key";

pub const REFERENCE_IMAGES: [&str; 2] = ["https://ref.test/studio-1.png", "https://ref.test/studio-2.png"];

fn key() -> Option<SecretString> {
    Some(SecretString::from(TEST_KEY))
}

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Minimal config: health on, speech synthesis without a key
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Point speech synthesis at a mock and keep its files under `output_dir`
    pub fn with_tts(mut self, base_url: &str, output_dir: &Path) -> Self {
        self.config.tts = TtsConfig {
            api_key: key(),
            base_url: Some(base_url.parse().expect("valid URL")),
            output_dir: output_dir.to_path_buf(),
            ..TtsConfig::default()
        };
        self
    }

    /// Drop the speech synthesis key while keeping the rest
    pub fn without_tts_key(mut self) -> Self {
        self.config.tts.api_key = None;
        self
    }

    pub fn with_imagegen(mut self, base_url: &str) -> Self {
        self.config.imagegen = Some(ImageGenConfig {
            provider_type: ImageGenProviderType::Fal,
            api_key: key(),
            base_url: Some(base_url.parse().expect("valid URL")),
            model: "fal-ai/flux/dev".to_owned(),
            image_size: "portrait_4_3".to_owned(),
            transform: Some(TransformConfig {
                model: "fal-ai/flux-pro/kontext/max/multi".to_owned(),
                prompt: "put them in the studio".to_owned(),
                aspect_ratio: "9:16".to_owned(),
                reference_images: REFERENCE_IMAGES.iter().map(ToString::to_string).collect(),
            }),
        });
        self
    }

    pub fn with_llm(mut self, base_url: &str) -> Self {
        self.config.llm = Some(LlmConfig {
            provider_type: LlmProviderType::Openai,
            api_key: key(),
            base_url: Some(base_url.parse().expect("valid URL")),
            model: "gpt-4o-mini".to_owned(),
            temperature: None,
        });
        self
    }

    pub fn with_video(mut self, base_url: &str, max_wait: &str) -> Self {
        self.config.video = Some(VideoConfig {
            provider_type: VideoProviderType::Fal,
            api_key: key(),
            base_url: Some(base_url.parse().expect("valid URL")),
            model: "fal-ai/ai-avatar".to_owned(),
            poll_interval: "20ms".to_owned(),
            max_wait: max_wait.to_owned(),
        });
        self
    }

    /// Store uploads in `directory`, served from a fake public host
    pub fn with_local_storage(mut self, directory: &Path) -> Self {
        self.config.storage = Some(StorageConfig::Local(LocalStorageConfig {
            directory: directory.to_path_buf(),
            public_base_url: "https://files.test/media".parse().expect("valid URL"),
        }));
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Validate and return the final config
    pub fn build(self) -> Config {
        self.config.validate().expect("test config is valid");
        self.config
    }
}
