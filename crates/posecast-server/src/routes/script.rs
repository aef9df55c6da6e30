use axum::{Json, extract::State};
use posecast_llm::{ScriptOutcome, ScriptRequest};

use crate::{error::Result, extract::ExtractPayload, state::AppState};

/// Write a podcast script for two characters
///
/// A completion that is not a script still answers 200, carrying the raw
/// completion next to an error message.
pub async fn generate_script(
    State(state): State<AppState>,
    ExtractPayload(request): ExtractPayload<ScriptRequest>,
) -> Result<Json<ScriptOutcome>> {
    let outcome = state.llm()?.write_script(&request).await?;

    if let ScriptOutcome::Parsed(ref script) = outcome {
        tracing::debug!(lines = script.dialogues.len(), "script written");
    }

    Ok(Json(outcome))
}
