use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::{HeaderValue, StatusCode, header::RETRY_AFTER};
use posecast_core::HttpError;
use serde_json::{Map, Value, json};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Every failure an endpoint can report
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Tts(#[from] tts::TtsError),

    #[error(transparent)]
    ImageGen(#[from] posecast_imagegen::ImageGenError),

    #[error(transparent)]
    Llm(#[from] posecast_llm::LlmError),

    #[error(transparent)]
    Storage(#[from] posecast_storage::StorageError),

    #[error(transparent)]
    Video(#[from] posecast_video::VideoError),

    /// Request rejected by the endpoint itself
    #[error("{0}")]
    Validation(String),

    /// Request body rejected before it reached the endpoint
    #[error("{message}")]
    Payload { status: StatusCode, message: String },

    /// Local failure unrelated to any collaborator
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn as_http_error(&self) -> Option<&dyn HttpError> {
        match self {
            Self::Tts(e) => Some(e),
            Self::ImageGen(e) => Some(e),
            Self::Llm(e) => Some(e),
            Self::Storage(e) => Some(e),
            Self::Video(e) => Some(e),
            Self::Validation(_) | Self::Payload { .. } | Self::Internal(_) => None,
        }
    }
}

impl HttpError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Payload { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            other => other.as_http_error().map_or(StatusCode::INTERNAL_SERVER_ERROR, HttpError::status_code),
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Validation(_) | Self::Payload { .. } => "invalid_request_error",
            Self::Internal(_) => "internal_error",
            other => other.as_http_error().map_or("internal_error", HttpError::error_type),
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Internal(_) => "Internal server error".to_owned(),
            other => other
                .as_http_error()
                .map_or_else(|| other.to_string(), HttpError::client_message),
        }
    }

    fn details(&self) -> posecast_core::ErrorDetails {
        self.as_http_error().map(HttpError::details).unwrap_or_default()
    }

    fn retry_after(&self) -> Option<u64> {
        self.as_http_error().and_then(HttpError::retry_after)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        let mut error = Map::new();
        error.insert("message".to_owned(), Value::from(self.client_message()));
        error.insert("type".to_owned(), Value::from(self.error_type()));
        error.insert("code".to_owned(), Value::from(status.as_u16()));
        error.extend(self.details());

        let mut response = (status, Json(json!({ "error": error }))).into_response();

        if let Some(seconds) = self.retry_after() {
            response.headers_mut().insert(RETRY_AFTER, HeaderValue::from(seconds));
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn render(error: ApiError) -> (StatusCode, Option<HeaderValue>, Value) {
        let response = error.into_response();
        let status = response.status();
        let retry_after = response.headers().get(RETRY_AFTER).cloned();
        let body = response.into_body().collect().await.unwrap().to_bytes();

        (status, retry_after, serde_json::from_slice(&body).unwrap())
    }

    fn will_request() -> tts::SynthesisRequest {
        tts::SynthesisRequest::new("hi", tts::VoiceIdentifier::Will, "/tmp/x.mp3").unwrap()
    }

    #[tokio::test]
    async fn service_unavailable_sets_retry_after() {
        let error = tts::TtsError::ServiceUnavailable {
            retry_after: 3600,
            voice_id: will_request().voice().token().to_owned(),
            is_custom: false,
        };

        let (status, retry_after, body) = render(error.into()).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(retry_after.unwrap(), "3600");
        assert_eq!(
            body,
            json!({
                "error": {
                    "message": "Service temporarily unavailable",
                    "type": "service_unavailable",
                    "code": 503,
                    "voice_id": "bIHbv24MWmeRgasZH58o",
                    "is_custom": false,
                    "retry_after": 3600
                }
            })
        );
    }

    #[tokio::test]
    async fn validation_is_bad_request_without_details() {
        let (status, retry_after, body) = render(ApiError::Validation("Please provide a character description.".to_owned())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(retry_after.is_none());
        assert_eq!(body["error"]["type"], "invalid_request_error");
        assert_eq!(body["error"]["message"], "Please provide a character description.");
        assert!(body["error"].get("voice_id").is_none());
    }

    #[tokio::test]
    async fn storage_failure_is_bad_gateway() {
        let error = posecast_storage::StorageError::Upload {
            key: "audio/a.mp3".to_owned(),
            message: "denied".to_owned(),
        };

        let (status, _, body) = render(error.into()).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["type"], "storage_error");
    }
}
