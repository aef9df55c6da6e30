use std::{future::Future, io, path::PathBuf, time::Duration};

use async_trait::async_trait;
use futures_util::TryStreamExt;
use http::{StatusCode, header::ACCEPT};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tokio::{
    fs::{self, File},
    io::AsyncWriteExt,
    time::Instant,
};
use tokio_util::{io::StreamReader, sync::CancellationToken};

use crate::{
    error::{Result, TtsError},
    http_client::http_client,
    request::SynthesisRequest,
    sink::copy_chunked,
};

use super::SpeechProvider;

pub const DEFAULT_ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io/v1";

/// Low-latency model used for every call
pub const ELEVEN_FLASH_V2_5: &str = "eleven_flash_v2_5";

const VOICE_SETTINGS: VoiceSettings = VoiceSettings {
    speed: 1.1,
    stability: 0.5,
    similarity_boost: 0.75,
    style: 0.0,
    use_speaker_boost: true,
};

/// Explicit settings for the `ElevenLabs` fetcher
#[derive(Debug, Clone)]
pub struct SynthesizerConfig {
    pub api_key: Option<SecretString>,
    pub base_url: String,
    /// Applies when the request carries no deadline of its own
    pub default_deadline: Duration,
    pub max_audio_bytes: Option<u64>,
}

impl SynthesizerConfig {
    pub fn from_config(config: &posecast_config::TtsConfig) -> anyhow::Result<Self> {
        let default_deadline = posecast_config::parse_duration(&config.stream_timeout)?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config
                .base_url
                .as_ref()
                .map_or_else(|| DEFAULT_ELEVENLABS_API_URL.to_owned(), ToString::to_string),
            default_deadline,
            max_audio_bytes: config.max_audio_bytes,
        })
    }
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_ELEVENLABS_API_URL.to_owned(),
            default_deadline: Duration::from_secs(300),
            max_audio_bytes: None,
        }
    }
}

#[derive(Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct VoiceSettings {
    speed: f64,
    stability: f64,
    similarity_boost: f64,
    style: f64,
    use_speaker_boost: bool,
}

/// `ElevenLabs` streaming text-to-speech provider
pub struct ElevenLabsProvider {
    client: Client,
    config: SynthesizerConfig,
}

impl ElevenLabsProvider {
    pub fn new(config: SynthesizerConfig) -> Self {
        Self {
            client: http_client(),
            config,
        }
    }

    fn api_key(&self) -> Result<&SecretString> {
        usable_api_key(self.config.api_key.as_ref())
            .ok_or_else(|| TtsError::Configuration("ElevenLabs API key not found in configuration".to_owned()))
    }

    async fn download(
        &self,
        request: &SynthesisRequest,
        response: Response,
        cancel: &CancellationToken,
        deadline: Instant,
    ) -> Result<PathBuf> {
        let path = request.output_path();

        let mut file = File::create(path)
            .await
            .map_err(|e| TtsError::internal(request, format!("failed to create {}: {e}", path.display())))?;

        let mut reader = StreamReader::new(response.bytes_stream().map_err(io::Error::other));

        let copied = bounded(
            request,
            cancel,
            deadline,
            copy_chunked(&mut reader, &mut file, self.config.max_audio_bytes),
        )
        .await;

        // The file is closed on drop; flush first so nothing buffered is lost
        // whichever way the copy ended.
        let flushed = file.flush().await;

        let stats = copied?.map_err(|e| {
            tracing::error!(voice_id = request.voice().token(), error = %e, "audio stream failed");
            TtsError::internal(request, format!("failed to stream audio to {}: {e}", path.display()))
        })?;

        flushed.map_err(|e| TtsError::internal(request, format!("failed to flush {}: {e}", path.display())))?;

        tracing::info!(
            voice_id = request.voice().token(),
            bytes = stats.bytes,
            writes = stats.writes,
            path = %path.display(),
            "speech synthesized"
        );

        Ok(path.to_path_buf())
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabsProvider {
    async fn synthesize(&self, request: &SynthesisRequest, cancel: &CancellationToken) -> Result<PathBuf> {
        let api_key = self.api_key()?;
        let voice_id = request.voice().token();
        let deadline = Instant::now() + request.deadline().unwrap_or(self.config.default_deadline);

        if let Some(parent) = request.output_path().parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                TtsError::internal(request, format!("failed to create directory {}: {e}", parent.display()))
            })?;
        }

        let url = format!("{}/text-to-speech/{voice_id}", self.config.base_url.trim_end_matches('/'));

        tracing::debug!(
            voice_id,
            is_custom = request.is_custom(),
            script_len = request.script().len(),
            "ElevenLabs TTS request"
        );

        let body = ElevenLabsRequest {
            text: request.script(),
            model_id: ELEVEN_FLASH_V2_5,
            voice_settings: VOICE_SETTINGS,
        };

        let send = self
            .client
            .post(&url)
            .header(ACCEPT, "audio/mpeg")
            .header("xi-api-key", api_key.expose_secret())
            .json(&body)
            .send();

        let response = bounded(request, cancel, deadline, send).await?.map_err(|e| {
            tracing::error!(voice_id, error = %e, "ElevenLabs request failed");
            TtsError::internal(request, format!("failed to send request to ElevenLabs: {e}"))
        })?;

        match response.status() {
            StatusCode::OK => self.download(request, response, cancel, deadline).await,
            StatusCode::SERVICE_UNAVAILABLE => {
                tracing::warn!(voice_id, "ElevenLabs is temporarily unavailable");
                Err(TtsError::service_unavailable(request))
            }
            status => {
                let message = bounded(request, cancel, deadline, response.text())
                    .await?
                    .map_err(|e| TtsError::internal(request, format!("failed to read ElevenLabs error body: {e}")))?;

                tracing::error!(voice_id, status = status.as_u16(), "ElevenLabs API error: {message}");

                Err(TtsError::generation_failed(request, status.as_u16(), message))
            }
        }
    }

    fn name(&self) -> &str {
        "elevenlabs"
    }
}

/// Run one stage of a call under the request's deadline and cancellation
/// The key, unless it is absent or blank
///
/// An unset `{{ env.X | default("") }}` placeholder yields an empty key,
/// which counts as missing.
pub(crate) fn usable_api_key(key: Option<&SecretString>) -> Option<&SecretString> {
    key.filter(|key| !key.expose_secret().trim().is_empty())
}

async fn bounded<F: Future>(
    request: &SynthesisRequest,
    cancel: &CancellationToken,
    deadline: Instant,
    stage: F,
) -> Result<F::Output> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(TtsError::internal(request, "synthesis cancelled")),
        output = tokio::time::timeout_at(deadline, stage) => {
            output.map_err(|_| TtsError::internal(request, "synthesis deadline exceeded"))
        }
    }
}
