use std::io::Write;

use axum::{Json, extract::State};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::{ApiError, Result},
    extract::ExtractPayload,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct UploadedCharacterRequest {
    image_base64: String,
}

/// Split an optional `data:<mime>;base64,` prefix from the payload
///
/// Returns the file extension implied by the MIME type and the bare base64.
fn split_data_url(input: &str) -> (&'static str, &str) {
    let input = input.trim();

    let Some((header, data)) = input.strip_prefix("data:").and_then(|rest| rest.split_once(',')) else {
        return ("png", input);
    };

    let mime = header.split(';').next().unwrap_or_default();
    let extension = match mime.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    };

    (extension, data)
}

/// Place an uploaded photo into the podcast studio
///
/// The reply of the image transform is returned untouched.
pub async fn generate_uploaded_character(
    State(state): State<AppState>,
    ExtractPayload(request): ExtractPayload<UploadedCharacterRequest>,
) -> Result<Json<Value>> {
    let (extension, data) = split_data_url(&request.image_base64);

    let image = STANDARD
        .decode(data)
        .map_err(|e| ApiError::Validation(format!("image_base64 is not valid base64: {e}")))?;

    if image.is_empty() {
        return Err(ApiError::Validation("image_base64 must not be empty".to_owned()));
    }

    let imagegen = state.imagegen()?;
    let storage = state.storage()?;

    // Removed when dropped, after the upload
    let mut file = tempfile::Builder::new()
        .prefix("posecast-upload-")
        .suffix(&format!(".{extension}"))
        .tempfile()
        .and_then(|mut file| file.write_all(&image).map(|()| file))
        .map_err(|e| ApiError::Internal(format!("failed to stage upload: {e}")))?;
    file.flush()
        .map_err(|e| ApiError::Internal(format!("failed to stage upload: {e}")))?;

    let key = format!("uploads/{}.{extension}", Uuid::new_v4());
    let image_url = storage.upload(file.path(), &key).await?;

    tracing::debug!(%image_url, bytes = image.len(), "uploaded character image");

    let result = imagegen.transform(&image_url).await?;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_base64_defaults_to_png() {
        assert_eq!(split_data_url("aGVsbG8="), ("png", "aGVsbG8="));
    }

    #[test]
    fn data_url_prefix_is_stripped() {
        assert_eq!(split_data_url("data:image/jpeg;base64,aGVsbG8="), ("jpg", "aGVsbG8="));
        assert_eq!(split_data_url(" data:image/webp;base64,AAAA "), ("webp", "AAAA"));
    }
}
