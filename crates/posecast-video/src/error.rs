use std::time::Duration;

use http::StatusCode;
use posecast_core::HttpError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VideoError>;

/// Video generation errors
#[derive(Debug, Error)]
pub enum VideoError {
    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Provider API returned an error
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The job reported a status this client does not know
    #[error("Unexpected job status '{0}'")]
    UnexpectedStatus(String),

    /// The job finished without a video
    #[error("No video URL found in result")]
    MissingVideo,

    /// The job did not finish in time
    #[error("Video generation did not finish within {}s", .0.as_secs())]
    Timeout(Duration),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Provider reply could not be decoded
    #[error("Internal server error")]
    InternalError,
}

impl HttpError for VideoError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ProviderApiError { status, .. } => match *status {
                400 | 422 => StatusCode::BAD_REQUEST,
                401 => StatusCode::UNAUTHORIZED,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::ConnectionError(_) | Self::UnexpectedStatus(_) | Self::MissingVideo => StatusCode::BAD_GATEWAY,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::ConfigError(_) | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::ProviderApiError { .. }
            | Self::ConnectionError(_)
            | Self::UnexpectedStatus(_)
            | Self::MissingVideo => "api_error",
            Self::Timeout(_) => "timeout_error",
            Self::ConfigError(_) | Self::InternalError => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_gateway_timeout() {
        let err = VideoError::Timeout(Duration::from_secs(900));

        assert_eq!(err.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(err.error_type(), "timeout_error");
        assert_eq!(err.client_message(), "Video generation did not finish within 900s");
    }
}
