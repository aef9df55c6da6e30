use http::StatusCode;
use serde_json::{Map, Value};

/// Extra machine-readable fields attached to an error body
pub type ErrorDetails = Map<String, Value>;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each collaborator crate's error type. The server layer
/// converts these into actual HTTP responses, keeping domain errors
/// decoupled from axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;

    /// Additional fields merged into the error body
    fn details(&self) -> ErrorDetails {
        ErrorDetails::new()
    }

    /// Suggested delay in seconds before the caller tries again
    fn retry_after(&self) -> Option<u64> {
        None
    }
}
