use http::StatusCode;
use posecast_core::HttpError;
use thiserror::Error;

/// Errors that can occur during text completion
#[derive(Debug, Error)]
pub enum LlmError {
    /// Upstream provider returned an error or could not be reached
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Upstream answered without any completion text
    #[error("upstream returned no completion")]
    EmptyCompletion,

    /// Client sent a malformed or invalid request
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Unusable provider configuration
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl HttpError for LlmError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Upstream(_) | Self::EmptyCompletion => StatusCode::BAD_GATEWAY,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Upstream(_) | Self::EmptyCompletion => "upstream_error",
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::Configuration(_) => "configuration_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::InvalidRequest(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
