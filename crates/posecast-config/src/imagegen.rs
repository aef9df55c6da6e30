use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Image generation configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageGenConfig {
    /// Provider type
    #[serde(rename = "type", default)]
    pub provider_type: ImageGenProviderType,
    /// API key
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model used for character portraits
    #[serde(default = "default_model")]
    pub model: String,
    /// Image size preset passed to the model
    #[serde(default = "default_image_size")]
    pub image_size: String,
    /// Uploaded-character transform; the endpoint is disabled without it
    #[serde(default)]
    pub transform: Option<TransformConfig>,
}

/// Supported image generation providers
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageGenProviderType {
    /// fal.ai synchronous endpoints
    #[default]
    Fal,
}

/// Fixed parameters for turning an uploaded photo into a podcast character
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformConfig {
    /// Multi-image editing model
    #[serde(default = "default_transform_model")]
    pub model: String,
    /// Prompt sent with every transform
    #[serde(default = "default_transform_prompt")]
    pub prompt: String,
    /// Output aspect ratio
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    /// The two reference images combined with the upload
    pub reference_images: Vec<String>,
}

fn default_model() -> String {
    "fal-ai/flux/dev".to_string()
}

fn default_image_size() -> String {
    "portrait_4_3".to_string()
}

fn default_transform_model() -> String {
    "fal-ai/flux-pro/kontext/max/multi".to_string()
}

fn default_transform_prompt() -> String {
    "Place the person from the first image into the podcast studio shown in the other images, \
     seated in front of the microphone, keeping their face and clothing unchanged"
        .to_string()
}

fn default_aspect_ratio() -> String {
    "9:16".to_string()
}
