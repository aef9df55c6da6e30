use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tts::{SynthesisRequest, VoiceIdentifier};
use uuid::Uuid;

use crate::{error::Result, extract::ExtractPayload, state::AppState};

#[derive(Debug, Deserialize)]
pub struct DialogueRequest {
    dialogue: String,
    /// Voice name or token; the configured default when absent
    #[serde(default)]
    voice: Option<String>,
    #[serde(default)]
    is_custom: bool,
}

#[derive(Debug, Serialize)]
pub struct DialogueResponse {
    audio_url: String,
}

/// Speak one line of dialogue and publish the audio
pub async fn dia_to_wav(
    State(state): State<AppState>,
    ExtractPayload(request): ExtractPayload<DialogueRequest>,
) -> Result<Json<DialogueResponse>> {
    let storage = state.storage()?;

    let voice = match request.voice.as_deref() {
        Some(name) => name.parse::<VoiceIdentifier>()?,
        None => state.synthesizer.default_voice(),
    };

    let id = Uuid::new_v4().to_string();
    let synthesis = SynthesisRequest::new(request.dialogue, voice, state.synthesizer.output_path(&id))?
        .with_custom_voice(request.is_custom);

    let cancel = state.shutdown.child_token();
    let audio_path = state.synthesizer.synthesize(&synthesis, &cancel).await?;

    let audio_url = storage.upload(&audio_path, &format!("audio/{id}.mp3")).await?;

    if let Err(e) = tokio::fs::remove_file(&audio_path).await {
        tracing::warn!(path = %audio_path.display(), error = %e, "failed to remove local audio");
    }

    tracing::info!(voice = %voice, %audio_url, "dialogue synthesized");

    Ok(Json(DialogueResponse { audio_url }))
}
