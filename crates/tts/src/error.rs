use http::StatusCode;
use posecast_core::{ErrorDetails, HttpError};
use serde_json::Value;
use thiserror::Error;

use crate::request::SynthesisRequest;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Delay suggested to callers when the provider reports 503
pub const RETRY_AFTER_SECS: u64 = 3600;

/// Failure kinds produced by the speech synthesis fetcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigurationError,
    ServiceUnavailable,
    GenerationFailed,
    InternalError,
    ValidationError,
}

/// Speech synthesis errors
#[derive(Debug, Error)]
pub enum TtsError {
    /// Missing credential or unusable configuration; no call was attempted
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider answered 503
    #[error("Service temporarily unavailable")]
    ServiceUnavailable {
        retry_after: u64,
        voice_id: String,
        is_custom: bool,
    },

    /// Provider answered with any other non-200 status
    #[error("Failed to generate text-to-speech audio: {message}")]
    GenerationFailed {
        status: u16,
        message: String,
        voice_id: String,
        is_custom: bool,
    },

    /// Transport, decoding, or disk failure, including deadline and cancellation
    #[error("Failed to generate text-to-speech audio: {message}")]
    Internal {
        message: String,
        voice_id: String,
        is_custom: bool,
    },

    /// Caller input rejected before any work started
    #[error("Invalid request: {0}")]
    Validation(String),
}

impl TtsError {
    pub(crate) fn service_unavailable(request: &SynthesisRequest) -> Self {
        Self::ServiceUnavailable {
            retry_after: RETRY_AFTER_SECS,
            voice_id: request.voice().token().to_owned(),
            is_custom: request.is_custom(),
        }
    }

    pub(crate) fn generation_failed(request: &SynthesisRequest, status: u16, message: String) -> Self {
        Self::GenerationFailed {
            status,
            message,
            voice_id: request.voice().token().to_owned(),
            is_custom: request.is_custom(),
        }
    }

    pub(crate) fn internal(request: &SynthesisRequest, message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            voice_id: request.voice().token().to_owned(),
            is_custom: request.is_custom(),
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::ConfigurationError,
            Self::ServiceUnavailable { .. } => ErrorKind::ServiceUnavailable,
            Self::GenerationFailed { .. } => ErrorKind::GenerationFailed,
            Self::Internal { .. } => ErrorKind::InternalError,
            Self::Validation(_) => ErrorKind::ValidationError,
        }
    }

    /// The bare failure message
    ///
    /// For `GenerationFailed` this is the provider's response body, verbatim.
    pub fn message(&self) -> &str {
        match self {
            Self::Configuration(message)
            | Self::Validation(message)
            | Self::GenerationFailed { message, .. }
            | Self::Internal { message, .. } => message,
            Self::ServiceUnavailable { .. } => "Service temporarily unavailable",
        }
    }

    /// Provider token of the voice involved, when the failure concerns a call
    pub fn voice_id(&self) -> Option<&str> {
        match self {
            Self::ServiceUnavailable { voice_id, .. }
            | Self::GenerationFailed { voice_id, .. }
            | Self::Internal { voice_id, .. } => Some(voice_id),
            Self::Configuration(_) | Self::Validation(_) => None,
        }
    }

    pub const fn is_custom(&self) -> Option<bool> {
        match self {
            Self::ServiceUnavailable { is_custom, .. }
            | Self::GenerationFailed { is_custom, .. }
            | Self::Internal { is_custom, .. } => Some(*is_custom),
            Self::Configuration(_) | Self::Validation(_) => None,
        }
    }
}

impl HttpError for TtsError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Configuration(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::GenerationFailed { status, .. } => match StatusCode::from_u16(*status) {
                Ok(status) if status.is_client_error() => status,
                _ => StatusCode::BAD_GATEWAY,
            },
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Configuration(_) => "configuration_error",
            Self::ServiceUnavailable { .. } => "service_unavailable",
            Self::GenerationFailed { .. } => "failed_to_generate_audio",
            Self::Internal { .. } => "internal_server_error",
            Self::Validation(_) => "invalid_request_error",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new();

        if let Some(voice_id) = self.voice_id() {
            details.insert("voice_id".to_owned(), Value::from(voice_id));
        }
        if let Some(is_custom) = self.is_custom() {
            details.insert("is_custom".to_owned(), Value::from(is_custom));
        }
        if let Some(retry_after) = HttpError::retry_after(self) {
            details.insert("retry_after".to_owned(), Value::from(retry_after));
        }

        details
    }

    fn retry_after(&self) -> Option<u64> {
        match self {
            Self::ServiceUnavailable { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }
}
