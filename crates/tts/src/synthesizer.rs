use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use crate::{
    error::Result,
    provider::{
        SpeechProvider,
        elevenlabs::{ElevenLabsProvider, SynthesizerConfig, usable_api_key},
    },
    request::SynthesisRequest,
    voice::VoiceIdentifier,
};

/// Speech synthesis fetcher shared by every request
pub struct Synthesizer {
    provider: Box<dyn SpeechProvider>,
    default_voice: VoiceIdentifier,
    output_dir: PathBuf,
}

impl Synthesizer {
    /// Fetch one script as audio into the request's output path
    ///
    /// Exactly one outcome per call: the output path, or a [`crate::TtsError`]
    /// whose kind tells the caller how to report it.
    pub async fn synthesize(&self, request: &SynthesisRequest, cancel: &CancellationToken) -> Result<PathBuf> {
        tracing::debug!(provider = self.provider.name(), voice = %request.voice(), "synthesizing speech");
        self.provider.synthesize(request, cancel).await
    }

    /// Voice used when a caller names none
    pub const fn default_voice(&self) -> VoiceIdentifier {
        self.default_voice
    }

    /// Destination for a new artifact named `stem`, inside the output directory
    pub fn output_path(&self, stem: &str) -> PathBuf {
        self.output_dir.join(format!("{stem}.mp3"))
    }
}

/// Builder for constructing the synthesizer from configuration
pub struct SynthesizerBuilder<'a> {
    config: &'a posecast_config::TtsConfig,
    provider: Option<Box<dyn SpeechProvider>>,
}

impl<'a> SynthesizerBuilder<'a> {
    pub const fn new(config: &'a posecast_config::TtsConfig) -> Self {
        Self { config, provider: None }
    }

    /// Use `provider` instead of the `ElevenLabs` provider built from config
    #[must_use]
    pub fn with_provider(mut self, provider: Box<dyn SpeechProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn build(self) -> anyhow::Result<Synthesizer> {
        let default_voice = self
            .config
            .default_voice
            .parse::<VoiceIdentifier>()
            .map_err(|e| anyhow::anyhow!("tts.default_voice: {e}"))?;

        let provider = match self.provider {
            Some(provider) => provider,
            None => Box::new(ElevenLabsProvider::new(SynthesizerConfig::from_config(self.config)?)),
        };

        if usable_api_key(self.config.api_key.as_ref()).is_none() {
            tracing::warn!("no ElevenLabs API key configured; speech synthesis requests will fail");
        }

        tracing::debug!(
            provider = provider.name(),
            default_voice = %default_voice,
            output_dir = %self.config.output_dir.display(),
            "speech synthesizer ready"
        );

        Ok(Synthesizer {
            provider,
            default_voice,
            output_dir: self.config.output_dir.clone(),
        })
    }
}
