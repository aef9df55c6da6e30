#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod fal;
mod server;
mod types;

use std::sync::Arc;

pub use error::{Result, VideoError};
pub use fal::{FalQueue, JobHandle};
pub use server::{Server, VideoServerBuilder};
pub use types::{JobEvent, VideoArgs};

/// Build the video generation server from configuration
///
/// # Errors
///
/// Returns an error if the provider cannot be configured
pub fn build_server(config: &posecast_config::VideoConfig) -> anyhow::Result<Arc<Server>> {
    let server = VideoServerBuilder::new(config)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to initialize video generation server: {e}"))?;

    Ok(Arc::new(server))
}
