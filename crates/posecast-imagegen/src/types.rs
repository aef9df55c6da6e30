use serde::{Deserialize, Serialize};

/// Text-to-image request
#[derive(Debug, Clone, Serialize)]
pub struct ImageRequest {
    /// Text description of the desired image
    pub prompt: String,
    /// Size preset understood by the model (e.g. "`portrait_4_3`")
    pub image_size: String,
    /// Number of images to generate
    pub num_images: u32,
}

/// Single image entry in the response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageData {
    /// Where the generated image can be fetched
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Text-to-image response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub images: Vec<ImageData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl ImageResponse {
    /// URL of the first image, when there is one
    pub fn first_url(&self) -> Option<&str> {
        self.images.first().and_then(|image| image.url.as_deref())
    }
}

/// Multi-image edit request
#[derive(Debug, Clone, Serialize)]
pub struct TransformRequest {
    /// Source images, the subject first
    pub image_urls: Vec<String>,
    pub prompt: String,
    pub aspect_ratio: String,
}
