use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::ImageGenProvider;
use crate::{
    error::{ImageGenError, Result},
    types::{ImageRequest, ImageResponse, TransformRequest},
};

/// Default fal.ai synchronous API base URL
pub(crate) const DEFAULT_BASE_URL: &str = "https://fal.run";

/// fal.ai image generation provider
pub(crate) struct FalImageGenProvider {
    name: String,
    client: Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    transform_model: Option<String>,
}

impl FalImageGenProvider {
    pub fn new(
        api_key: SecretString,
        base_url: Option<String>,
        model: String,
        transform_model: Option<String>,
    ) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            name: "fal".to_string(),
            client: Client::new(),
            api_key,
            base_url,
            model,
            transform_model,
        }
    }

    async fn post<B, T>(&self, model: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}/{model}", self.base_url.trim_end_matches('/'));

        tracing::debug!(provider = %self.name, model, "sending image request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Key {}", self.api_key.expose_secret()))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, error = %e, "image request failed");
                ImageGenError::ConnectionError(format!("Failed to send request to fal: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(provider = %self.name, status = %status, "fal image API error");

            return Err(match status.as_u16() {
                401 => ImageGenError::AuthenticationFailed(error_text),
                400 => ImageGenError::InvalidRequest(error_text),
                _ => ImageGenError::ProviderApiError {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        response.json().await.map_err(|e| {
            tracing::error!(provider = %self.name, error = %e, "failed to parse fal image response");
            ImageGenError::InternalError(None)
        })
    }
}

#[async_trait]
impl ImageGenProvider for FalImageGenProvider {
    async fn generate(&self, request: &ImageRequest) -> Result<ImageResponse> {
        let response: ImageResponse = self.post(&self.model, request).await?;

        tracing::debug!(
            provider = %self.name,
            images = response.images.len(),
            "image generation request complete"
        );

        Ok(response)
    }

    async fn transform(&self, request: &TransformRequest) -> Result<Value> {
        let model = self
            .transform_model
            .as_deref()
            .ok_or_else(|| ImageGenError::ConfigError("no transform model configured".to_string()))?;

        if request.image_urls.is_empty() {
            return Err(ImageGenError::InvalidRequest("at least one image is required".to_string()));
        }

        self.post(model, request).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
