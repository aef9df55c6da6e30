use axum::{
    body::Body,
    extract::{FromRequest, Request},
};
use http::{StatusCode, header::CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::{error::ApiError, state::AppState};

/// Extractor for JSON request bodies
///
/// Rejects anything that is not `application/json` with 415, bodies over the
/// configured limit with 413, and unreadable or malformed bodies with 400.
pub struct ExtractPayload<T>(pub T);

fn is_json(request: &Request<Body>) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

impl<T: DeserializeOwned> FromRequest<AppState> for ExtractPayload<T> {
    type Rejection = ApiError;

    async fn from_request(request: Request<Body>, state: &AppState) -> Result<Self, Self::Rejection> {
        if !is_json(&request) {
            return Err(ApiError::Payload {
                status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
                message: "Unsupported Content-Type, expected: 'Content-Type: application/json'".to_owned(),
            });
        }

        let limit = state.body_limit_bytes;

        let bytes = axum::body::to_bytes(request.into_body(), limit).await.map_err(|err| {
            if std::error::Error::source(&err).is_some_and(|source| source.is::<http_body_util::LengthLimitError>()) {
                ApiError::Payload {
                    status: StatusCode::PAYLOAD_TOO_LARGE,
                    message: format!("Request body is too large, limit is {limit} bytes"),
                }
            } else {
                ApiError::Payload {
                    status: StatusCode::BAD_REQUEST,
                    message: format!("Failed to read request body: {err}"),
                }
            }
        })?;

        serde_json::from_slice::<T>(&bytes)
            .map(Self)
            .map_err(|e| ApiError::Payload {
                status: StatusCode::BAD_REQUEST,
                message: format!("Failed to parse request body: {e}"),
            })
    }
}
