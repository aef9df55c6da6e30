pub mod elevenlabs;

use std::path::PathBuf;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::request::SynthesisRequest;

/// Trait for speech synthesis provider implementations
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize the request's script into its output path
    ///
    /// Returns the output path once the audio is fully on disk.
    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        cancel: &CancellationToken,
    ) -> crate::error::Result<PathBuf>;

    /// Get the provider name
    fn name(&self) -> &str;
}
