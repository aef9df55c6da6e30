use std::sync::Arc;

use posecast_storage::ObjectStore;
use tokio_util::sync::CancellationToken;
use tts::Synthesizer;

use crate::error::{ApiError, Result};

/// Collaborators shared by every handler
///
/// Everything but the synthesizer is optional; routes needing a missing
/// collaborator are not mounted, so the accessors only fail if a handler is
/// wired up without its dependency.
#[derive(Clone)]
pub struct AppState {
    pub synthesizer: Arc<Synthesizer>,
    pub imagegen: Option<Arc<posecast_imagegen::Server>>,
    pub llm: Option<Arc<posecast_llm::Server>>,
    pub storage: Option<Arc<dyn ObjectStore>>,
    pub video: Option<Arc<posecast_video::Server>>,
    pub body_limit_bytes: usize,
    /// Cancelled on shutdown so in-flight downloads stop promptly
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn imagegen(&self) -> Result<&posecast_imagegen::Server> {
        self.imagegen.as_deref().ok_or_else(|| missing("image generation"))
    }

    pub fn llm(&self) -> Result<&posecast_llm::Server> {
        self.llm.as_deref().ok_or_else(|| missing("text completion"))
    }

    pub fn storage(&self) -> Result<&dyn ObjectStore> {
        self.storage.as_deref().ok_or_else(|| missing("object storage"))
    }

    pub fn video(&self) -> Result<&posecast_video::Server> {
        self.video.as_deref().ok_or_else(|| missing("video generation"))
    }
}

fn missing(what: &str) -> ApiError {
    ApiError::Payload {
        status: http::StatusCode::SERVICE_UNAVAILABLE,
        message: format!("{what} is not configured"),
    }
}
