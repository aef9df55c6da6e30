use std::time::Duration;

use futures_util::{Stream, stream};
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::{Result, VideoError},
    types::{JobEvent, StatusResponse, SubmitResponse, VideoArgs},
};

/// Default fal.ai queue API base URL
pub(crate) const DEFAULT_QUEUE_URL: &str = "https://queue.fal.run";

/// Client for the fal.ai queue API
#[derive(Clone)]
pub struct FalQueue {
    client: Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    poll_interval: Duration,
}

impl FalQueue {
    pub fn new(api_key: SecretString, base_url: Option<String>, model: String, poll_interval: Duration) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_QUEUE_URL.to_string());

        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            poll_interval,
        }
    }

    /// Queue a video job
    pub async fn submit(&self, args: &VideoArgs) -> Result<JobHandle> {
        let url = format!("{}/{}", self.base_url, self.model);

        tracing::debug!(model = %self.model, "submitting video job");

        let submitted: SubmitResponse = self.send(self.client.post(&url).json(args)).await?;

        let job_url = format!("{url}/requests/{}", submitted.request_id);
        let status_url = submitted.status_url.unwrap_or_else(|| format!("{job_url}/status"));
        let response_url = submitted.response_url.unwrap_or(job_url);

        tracing::info!(request_id = %submitted.request_id, "video job queued");

        Ok(JobHandle {
            queue: self.clone(),
            request_id: submitted.request_id,
            status_url,
            response_url,
        })
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .header("Authorization", format!("Key {}", self.api_key.expose_secret()))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "video request failed");
                VideoError::ConnectionError(format!("Failed to send request to fal: {e}"))
            })?;

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        tracing::error!(status = %status, "fal queue API error");

        return Err(VideoError::ProviderApiError {
            status: status.as_u16(),
            message,
        });
    }

    response.json().await.map_err(|e| {
        tracing::error!(error = %e, "failed to parse fal queue response");
        VideoError::InternalError
    })
}

#[derive(Clone, Copy)]
enum PollState {
    First,
    Next,
    Done,
}

/// A submitted job
pub struct JobHandle {
    queue: FalQueue,
    request_id: String,
    status_url: String,
    response_url: String,
}

impl JobHandle {
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Lazily poll the job, one event per poll
    ///
    /// The stream ends after [`JobEvent::Completed`] or the first error.
    pub fn events(&self) -> impl Stream<Item = Result<JobEvent>> + Send + '_ {
        stream::unfold(PollState::First, move |state| async move {
            match state {
                PollState::Done => return None,
                PollState::Next => tokio::time::sleep(self.queue.poll_interval).await,
                PollState::First => {}
            }

            match self.poll().await {
                Ok(JobEvent::Completed) => Some((Ok(JobEvent::Completed), PollState::Done)),
                Ok(event) => Some((Ok(event), PollState::Next)),
                Err(e) => Some((Err(e), PollState::Done)),
            }
        })
    }

    async fn poll(&self) -> Result<JobEvent> {
        let request = self.queue.client.get(&self.status_url).query(&[("logs", "1")]);
        let status: StatusResponse = self.queue.send(request).await?;
        let name = status.status.clone();

        status.into_event().ok_or(VideoError::UnexpectedStatus(name))
    }

    /// Fetch the finished job's output URL
    pub async fn result(&self) -> Result<String> {
        let output: Value = self.queue.send(self.queue.client.get(&self.response_url)).await?;

        output
            .pointer("/video/url")
            .or_else(|| output.get("output_url"))
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .ok_or(VideoError::MissingVideo)
    }
}
