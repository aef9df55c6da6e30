use std::time::Duration;

use futures_util::{StreamExt, pin_mut};
use posecast_config::{VideoConfig, VideoProviderType, parse_duration};

use crate::{
    error::{Result, VideoError},
    fal::FalQueue,
    types::{JobEvent, VideoArgs},
};

/// Video generation server: submits a job and waits for its output
pub struct Server {
    queue: FalQueue,
    max_wait: Duration,
}

impl Server {
    /// Run one job to completion and return the video URL
    pub async fn generate(&self, args: &VideoArgs) -> Result<String> {
        if args.image_url.trim().is_empty() || args.audio_url.trim().is_empty() {
            return Err(VideoError::InvalidRequest(
                "image_url and audio_url are required".to_string(),
            ));
        }

        let job = self.queue.submit(args).await?;

        tokio::time::timeout(self.max_wait, async {
            let events = job.events();
            pin_mut!(events);

            while let Some(event) = events.next().await {
                match event? {
                    JobEvent::Queued { position } => {
                        tracing::debug!(request_id = job.request_id(), ?position, "video job queued");
                    }
                    JobEvent::InProgress { logs } => {
                        tracing::debug!(request_id = job.request_id(), lines = logs.len(), last = ?logs.last(), "video job running");
                    }
                    JobEvent::Completed => {
                        tracing::debug!(request_id = job.request_id(), "video job completed");
                    }
                }
            }

            Ok::<_, VideoError>(())
        })
        .await
        .map_err(|_| {
            tracing::warn!(request_id = job.request_id(), "video job timed out");
            VideoError::Timeout(self.max_wait)
        })??;

        let video_url = job.result().await?;

        tracing::info!(request_id = job.request_id(), "video generated");

        Ok(video_url)
    }
}

/// Builder for constructing the video generation server from configuration
pub struct VideoServerBuilder<'a> {
    config: &'a VideoConfig,
}

impl<'a> VideoServerBuilder<'a> {
    pub const fn new(config: &'a VideoConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> Result<Server> {
        let poll_interval = parse_duration(&self.config.poll_interval)
            .map_err(|e| VideoError::ConfigError(format!("video.poll_interval: {e}")))?;
        let max_wait = parse_duration(&self.config.max_wait)
            .map_err(|e| VideoError::ConfigError(format!("video.max_wait: {e}")))?;

        let queue = match self.config.provider_type {
            VideoProviderType::Fal => {
                let api_key = self.config.api_key.clone().ok_or_else(|| {
                    VideoError::ConfigError("API key required for video generation".to_string())
                })?;

                FalQueue::new(
                    api_key,
                    self.config.base_url.as_ref().map(ToString::to_string),
                    self.config.model.clone(),
                    poll_interval,
                )
            }
        };

        tracing::debug!(model = %self.config.model, ?poll_interval, ?max_wait, "video generation server initialized");

        Ok(Server { queue, max_wait })
    }
}
