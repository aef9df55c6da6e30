use serde::{Deserialize, Serialize};

/// Inputs for a talking-portrait video
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VideoArgs {
    pub image_url: String,
    pub audio_url: String,
}

/// Progress of a queued job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    /// Waiting for a worker; `position` is the place in line when known
    Queued { position: Option<u64> },
    /// Running; `logs` holds the provider's log lines so far
    InProgress { logs: Vec<String> },
    /// Finished; the result is ready to fetch
    Completed,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    pub request_id: String,
    #[serde(default)]
    pub status_url: Option<String>,
    #[serde(default)]
    pub response_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub queue_position: Option<u64>,
    #[serde(default)]
    pub logs: Option<Vec<LogLine>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LogLine {
    pub message: String,
}

impl StatusResponse {
    pub(crate) fn into_event(self) -> Option<JobEvent> {
        let Self {
            status,
            queue_position,
            logs,
        } = self;

        match status.as_str() {
            "IN_QUEUE" => Some(JobEvent::Queued {
                position: queue_position,
            }),
            "IN_PROGRESS" => Some(JobEvent::InProgress {
                logs: logs.unwrap_or_default().into_iter().map(|line| line.message).collect(),
            }),
            "COMPLETED" => Some(JobEvent::Completed),
            _ => None,
        }
    }
}
