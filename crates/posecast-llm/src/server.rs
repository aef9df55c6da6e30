use posecast_config::{LlmConfig, LlmProviderType};

use crate::{
    error::LlmError,
    provider::{Provider, openai::OpenAiProvider},
    script::{ScriptOutcome, ScriptRequest},
};

/// Text completion server wrapping the configured provider
pub struct Server {
    provider: Box<dyn Provider>,
}

impl Server {
    /// Raw completion for `prompt`
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        tracing::debug!(provider = self.provider.name(), prompt_len = prompt.len(), "sending completion");
        self.provider.complete(prompt).await
    }

    /// Write a two-person podcast script
    pub async fn write_script(&self, request: &ScriptRequest) -> Result<ScriptOutcome, LlmError> {
        let prompt = request.prompt()?;
        let completion = self.complete(&prompt).await?;

        Ok(ScriptOutcome::from_completion(&completion))
    }
}

/// Builder for constructing the text completion server from configuration
pub struct LlmServerBuilder<'a> {
    config: &'a LlmConfig,
}

impl<'a> LlmServerBuilder<'a> {
    pub const fn new(config: &'a LlmConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> Result<Server, LlmError> {
        let provider: Box<dyn Provider> = match self.config.provider_type {
            LlmProviderType::Openai => {
                let api_key = self
                    .config
                    .api_key
                    .clone()
                    .ok_or_else(|| LlmError::Configuration("API key required for text completion".to_owned()))?;

                Box::new(OpenAiProvider::new(
                    api_key,
                    self.config.base_url.as_ref(),
                    self.config.model.clone(),
                    self.config.temperature,
                ))
            }
        };

        tracing::debug!(provider = provider.name(), model = %self.config.model, "text completion server initialized");

        Ok(Server { provider })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{Mock, MockServer, ResponseTemplate, matchers::method};

    use super::*;
    use crate::script::Character;

    fn config(base_url: &str) -> LlmConfig {
        toml::from_str(&format!("api_key = \"sk\"\nbase_url = \"{base_url}\"")).unwrap()
    }

    fn request() -> ScriptRequest {
        ScriptRequest {
            characters: vec![
                Character {
                    name: "Ada".to_owned(),
                    description: "a tired engineer".to_owned(),
                },
                Character {
                    name: "Bo".to_owned(),
                    description: "a cheerful cat".to_owned(),
                },
            ],
            podcast_description: "Monday mornings".to_owned(),
        }
    }

    #[test]
    fn api_key_is_required() {
        let config: LlmConfig = toml::from_str("model = \"gpt-4o\"").unwrap();
        assert!(matches!(
            LlmServerBuilder::new(&config).build().err(),
            Some(LlmError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn invalid_request_makes_no_call() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let llm = LlmServerBuilder::new(&config(&server.uri())).build().unwrap();
        let mut request = request();
        request.characters.pop();

        assert!(matches!(
            llm.write_script(&request).await,
            Err(LlmError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn writes_script_from_completion() {
        let server = MockServer::start().await;
        let script = r#"{"dialogues":[{"character":1,"text":"Coffee?"},{"character":2,"text":"Meow."}]}"#;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": script } }]
            })))
            .mount(&server)
            .await;

        let llm = LlmServerBuilder::new(&config(&server.uri())).build().unwrap();
        let outcome = llm.write_script(&request()).await.unwrap();

        assert!(matches!(outcome, ScriptOutcome::Parsed(ref s) if s.dialogues.len() == 2));
    }
}
