use axum::{Json, extract::State};
use posecast_video::VideoArgs;
use serde::Serialize;

use crate::{error::Result, extract::ExtractPayload, state::AppState};

#[derive(Debug, Serialize)]
pub struct VideoResponse {
    video_url: String,
}

/// Turn a portrait and an audio track into a talking video
pub async fn generate_video(
    State(state): State<AppState>,
    ExtractPayload(args): ExtractPayload<VideoArgs>,
) -> Result<Json<VideoResponse>> {
    let video_url = state.video()?.generate(&args).await?;

    Ok(Json(VideoResponse { video_url }))
}
