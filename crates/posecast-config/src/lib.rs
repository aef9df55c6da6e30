#![allow(clippy::must_use_candidate)]

pub mod cors;
mod duration;
mod env;
pub mod health;
pub mod imagegen;
pub mod llm;
mod loader;
pub mod server;
pub mod storage;
pub mod telemetry;
pub mod tts;
pub mod video;

use serde::Deserialize;

pub use cors::*;
pub use duration::parse_duration;
pub use health::*;
pub use imagegen::*;
pub use llm::*;
pub use server::*;
pub use storage::*;
pub use telemetry::*;
pub use tts::*;
pub use video::*;

/// Top-level Posecast configuration
///
/// Speech synthesis is always present because a missing credential is
/// reported per request. Every other collaborator is optional; endpoints that
/// need an unconfigured collaborator are not mounted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Speech synthesis configuration
    #[serde(default)]
    pub tts: TtsConfig,
    /// Image generation configuration
    #[serde(default)]
    pub imagegen: Option<ImageGenConfig>,
    /// Text completion configuration
    #[serde(default)]
    pub llm: Option<LlmConfig>,
    /// Object storage configuration
    #[serde(default)]
    pub storage: Option<StorageConfig>,
    /// Video generation configuration
    #[serde(default)]
    pub video: Option<VideoConfig>,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
