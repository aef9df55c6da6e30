use http::StatusCode;
use posecast_core::HttpError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Object storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Object key is empty or escapes the store
    #[error("invalid object key '{0}'")]
    InvalidKey(String),

    /// Local file could not be read
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    /// The backend rejected or failed the upload
    #[error("failed to upload '{key}': {message}")]
    Upload { key: String, message: String },
}

impl HttpError for StorageError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidKey(_) | Self::Read { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upload { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidKey(_) | Self::Read { .. } => "internal_error",
            Self::Upload { .. } => "storage_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            // Local paths stay out of responses
            Self::Read { .. } => "failed to read file for upload".to_owned(),
            other => other.to_string(),
        }
    }
}
