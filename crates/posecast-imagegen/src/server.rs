use posecast_config::{ImageGenConfig, ImageGenProviderType, TransformConfig};
use secrecy::SecretString;
use serde_json::Value;

use crate::{
    error::{ImageGenError, Result},
    provider::{ImageGenProvider, fal::FalImageGenProvider},
    types::{ImageRequest, ImageResponse, TransformRequest},
};

/// Image generation server holding the configured provider and fixed parameters
pub struct Server {
    provider: Box<dyn ImageGenProvider>,
    image_size: String,
    transform: Option<TransformConfig>,
}

impl Server {
    /// Generate one image for `prompt`
    pub async fn generate(&self, prompt: &str) -> Result<ImageResponse> {
        if prompt.trim().is_empty() {
            return Err(ImageGenError::InvalidRequest("prompt must not be empty".to_string()));
        }

        let request = ImageRequest {
            prompt: prompt.to_string(),
            image_size: self.image_size.clone(),
            num_images: 1,
        };

        self.provider.generate(&request).await
    }

    /// Generate one image and return its URL
    pub async fn generate_url(&self, prompt: &str) -> Result<String> {
        let response = self.generate(prompt).await?;

        response
            .first_url()
            .map(ToString::to_string)
            .ok_or(ImageGenError::MissingImage)
    }

    /// Whether uploaded-character transforms are configured
    pub const fn supports_transform(&self) -> bool {
        self.transform.is_some()
    }

    /// Place the subject at `image_url` into the configured reference scene
    pub async fn transform(&self, image_url: &str) -> Result<Value> {
        let transform = self
            .transform
            .as_ref()
            .ok_or_else(|| ImageGenError::ConfigError("image transform is not configured".to_string()))?;

        let mut image_urls = Vec::with_capacity(transform.reference_images.len() + 1);
        image_urls.push(image_url.to_string());
        image_urls.extend(transform.reference_images.iter().cloned());

        let request = TransformRequest {
            image_urls,
            prompt: transform.prompt.clone(),
            aspect_ratio: transform.aspect_ratio.clone(),
        };

        tracing::debug!(provider = self.provider.name(), "transforming uploaded character");

        self.provider.transform(&request).await
    }
}

/// Builder for constructing the image generation server from configuration
pub struct ImageGenServerBuilder<'a> {
    config: &'a ImageGenConfig,
}

impl<'a> ImageGenServerBuilder<'a> {
    pub const fn new(config: &'a ImageGenConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> Result<Server> {
        let provider: Box<dyn ImageGenProvider> = match self.config.provider_type {
            ImageGenProviderType::Fal => {
                let api_key = resolve_api_key(self.config)?;

                Box::new(FalImageGenProvider::new(
                    api_key,
                    self.config.base_url.as_ref().map(ToString::to_string),
                    self.config.model.clone(),
                    self.config.transform.as_ref().map(|t| t.model.clone()),
                ))
            }
        };

        tracing::debug!(
            provider = provider.name(),
            model = %self.config.model,
            transform = self.config.transform.is_some(),
            "image generation server initialized"
        );

        Ok(Server {
            provider,
            image_size: self.config.image_size.clone(),
            transform: self.config.transform.clone(),
        })
    }
}

fn resolve_api_key(config: &ImageGenConfig) -> Result<SecretString> {
    config
        .api_key
        .clone()
        .ok_or_else(|| ImageGenError::ConfigError("API key required for image generation".to_string()))
}
