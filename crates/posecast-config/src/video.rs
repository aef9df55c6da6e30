use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Video generation configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VideoConfig {
    /// Provider type
    #[serde(rename = "type", default)]
    pub provider_type: VideoProviderType,
    /// API key
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Queue base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Talking-head model turning a portrait and an audio track into video
    #[serde(default = "default_model")]
    pub model: String,
    /// Delay between job status polls (e.g. "2s")
    #[serde(default = "default_poll_interval")]
    pub poll_interval: String,
    /// Give up on a job after this long (e.g. "15m")
    #[serde(default = "default_max_wait")]
    pub max_wait: String,
}

/// Supported video generation providers
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoProviderType {
    /// fal.ai queue API
    #[default]
    Fal,
}

fn default_model() -> String {
    "fal-ai/ai-avatar".to_string()
}

fn default_poll_interval() -> String {
    "2s".to_string()
}

fn default_max_wait() -> String {
    "15m".to_string()
}
