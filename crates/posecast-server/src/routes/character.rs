use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, Result},
    extract::ExtractPayload,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CharacterRequest {
    #[serde(default)]
    character_description: String,
}

#[derive(Debug, Serialize)]
pub struct CharacterResponse {
    image_url: String,
}

/// Generate a character portrait from a description
pub async fn generate_character(
    State(state): State<AppState>,
    ExtractPayload(request): ExtractPayload<CharacterRequest>,
) -> Result<Json<CharacterResponse>> {
    if request.character_description.trim().is_empty() {
        return Err(ApiError::Validation("Please provide a character description.".to_owned()));
    }

    let image_url = state.imagegen()?.generate_url(&request.character_description).await?;

    tracing::debug!(%image_url, "character generated");

    Ok(Json(CharacterResponse { image_url }))
}
