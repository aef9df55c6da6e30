use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Speech synthesis configuration
///
/// The API key stays optional here: the fetcher reports a missing key as a
/// configuration error on each request instead of refusing to start.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// `ElevenLabs` API key
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Directory receiving synthesized audio before upload
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Voice used by the dialogue endpoint when the request names none
    #[serde(default = "default_voice")]
    pub default_voice: String,
    /// Deadline for one synthesis call, headers and body included (e.g. "5m")
    #[serde(default = "default_stream_timeout")]
    pub stream_timeout: String,
    /// Abort downloads larger than this many bytes
    #[serde(default)]
    pub max_audio_bytes: Option<u64>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            output_dir: default_output_dir(),
            default_voice: default_voice(),
            stream_timeout: default_stream_timeout(),
            max_audio_bytes: None,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated/audio")
}

fn default_voice() -> String {
    "will".to_string()
}

fn default_stream_timeout() -> String {
    "5m".to_string()
}
