use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    error::{Result, TtsError},
    voice::VoiceIdentifier,
};

/// A single speech synthesis job
///
/// The script is validated on construction; everything else is optional and
/// set with the `with_*` builders.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    script: String,
    voice: VoiceIdentifier,
    is_custom: bool,
    output_path: PathBuf,
    deadline: Option<Duration>,
}

impl SynthesisRequest {
    pub fn new(script: impl Into<String>, voice: VoiceIdentifier, output_path: impl Into<PathBuf>) -> Result<Self> {
        let script = script.into();

        if script.trim().is_empty() {
            return Err(TtsError::Validation("script must not be empty".to_owned()));
        }

        Ok(Self {
            script,
            voice,
            is_custom: false,
            output_path: output_path.into(),
            deadline: None,
        })
    }

    /// Mark the voice as a cloned voice
    ///
    /// Informational only: it is echoed in error details and never changes the
    /// provider call.
    #[must_use]
    pub const fn with_custom_voice(mut self, is_custom: bool) -> Self {
        self.is_custom = is_custom;
        self
    }

    /// Bound the whole call, body download included
    ///
    /// Overrides the synthesizer's default deadline for this request.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub const fn voice(&self) -> VoiceIdentifier {
        self.voice
    }

    pub const fn is_custom(&self) -> bool {
        self.is_custom
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn blank_script_is_rejected() {
        let err = SynthesisRequest::new(" \n\t", VoiceIdentifier::Sarah, "out.mp3").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
    }

    #[test]
    fn defaults_to_stock_voice_without_deadline() {
        let request = SynthesisRequest::new("Hi", VoiceIdentifier::Sarah, "out.mp3").unwrap();

        assert!(!request.is_custom());
        assert!(request.deadline().is_none());
        assert_eq!(request.output_path(), Path::new("out.mp3"));
    }
}
