//! Provider trait and implementations for text completion backends

pub mod openai;

use async_trait::async_trait;

use crate::error::LlmError;

/// Trait implemented by each text completion backend
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Send `prompt` as a single user message and return the reply text
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}
