#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod http_client;
mod provider;
mod request;
mod sink;
mod synthesizer;
mod voice;

use std::sync::Arc;

pub use error::{ErrorKind, RETRY_AFTER_SECS, Result, TtsError};
pub use provider::{
    SpeechProvider,
    elevenlabs::{DEFAULT_ELEVENLABS_API_URL, ELEVEN_FLASH_V2_5, ElevenLabsProvider, SynthesizerConfig},
};
pub use request::SynthesisRequest;
pub use sink::{CHUNK_SIZE, CopyStats, copy_chunked};
pub use synthesizer::{Synthesizer, SynthesizerBuilder};
pub use tokio_util::sync::CancellationToken;
pub use voice::VoiceIdentifier;

/// Build the speech synthesizer from configuration
pub fn build_synthesizer(config: &posecast_config::TtsConfig) -> anyhow::Result<Arc<Synthesizer>> {
    let synthesizer = SynthesizerBuilder::new(config)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to initialize speech synthesizer: {e}"))?;

    Ok(Arc::new(synthesizer))
}
