#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
pub mod provider;
mod script;
mod server;

use std::sync::Arc;

pub use error::LlmError;
pub use script::{Character, DialogueLine, PARSE_FAILURE_MESSAGE, Script, ScriptOutcome, ScriptRequest, Speaker};
pub use server::{LlmServerBuilder, Server};

/// Build the text completion server from configuration
///
/// # Errors
///
/// Returns an error if the provider cannot be configured
pub fn build_server(config: &posecast_config::LlmConfig) -> anyhow::Result<Arc<Server>> {
    let server = LlmServerBuilder::new(config)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to initialize text completion server: {e}"))?;

    Ok(Arc::new(server))
}
