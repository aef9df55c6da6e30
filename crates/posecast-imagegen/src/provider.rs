pub(crate) mod fal;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::Result,
    types::{ImageRequest, ImageResponse, TransformRequest},
};

/// Trait for image generation provider implementations
#[async_trait]
pub trait ImageGenProvider: Send + Sync {
    /// Generate images for the given request
    async fn generate(&self, request: &ImageRequest) -> Result<ImageResponse>;

    /// Edit a set of images into one, returning the provider's reply untouched
    async fn transform(&self, request: &TransformRequest) -> Result<Value>;

    /// Get the provider name
    fn name(&self) -> &str;
}
