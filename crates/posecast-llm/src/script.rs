//! Podcast script prompt and reply parsing

use indoc::formatdoc;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// Message returned when the completion is not a script
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse response from LLM as JSON";

/// One podcast guest
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Character {
    pub name: String,
    pub description: String,
}

/// Request for a two-person podcast script
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptRequest {
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub podcast_description: String,
}

impl ScriptRequest {
    /// The two guests, once the request is known to be usable
    pub fn validate(&self) -> Result<(&Character, &Character), LlmError> {
        match self.characters.as_slice() {
            [first, second] if !self.podcast_description.trim().is_empty() => Ok((first, second)),
            _ => Err(LlmError::InvalidRequest(
                "Please provide exactly 2 characters and a podcast description.".to_owned(),
            )),
        }
    }

    /// Render the comedy-writer prompt
    pub fn prompt(&self) -> Result<String, LlmError> {
        let (first, second) = self.validate()?;

        Ok(formatdoc! {r#"
            You are a comedy scriptwriter tasked with generating a short, funny podcast dialogue between two fictional characters.

            ## Instructions:
            You will receive:
            - Two character profiles (name + description)
            - A podcast episode context or theme

            Your job is to write a humorous, snappy, back-and-forth dialogue between the two characters.

            ### Dialogue Rules:
            - Each line must be under 10 seconds long when spoken (≈ 20 words max).
            - The dialogue should alternate between the two characters, no monologues.
            - Each line must reflect the speaker's distinct personality and voice.
            - The tone should be funny, clever, sarcastic, or satirical.
            - Dialogue must feel natural, quick-paced, and character-driven.

            ## Character Profiles:
            Character 1: {first_name}
            Character 2: {second_name}

            ## Character Descriptions:
            Character 1: {first_description}
            Character 2: {second_description}

            ## Podcast Context:
            {context}

            ## Output Format (JSON):
            Return only a JSON object with this structure:

            {{
              "dialogues": [
                {{
                  "character": 1,
                  "text": "Line of dialogue from character 1"
                }},
                {{
                  "character": 2,
                  "text": "Line of dialogue from character 2"
                }}
                // Continue for 8-10 total lines
              ]
            }}
            "#,
            first_name = first.name,
            second_name = second.name,
            first_description = first.description,
            second_description = second.description,
            context = self.podcast_description,
        })
    }
}

/// Who speaks a line: the character's position or, from looser models, a name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Speaker {
    Index(u8),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DialogueLine {
    pub character: Speaker,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Script {
    pub dialogues: Vec<DialogueLine>,
}

/// Result of asking for a script
///
/// A reply that is not a script is not an error: the raw text is handed back
/// so the caller can see what the model said.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScriptOutcome {
    Parsed(Script),
    Unparsed { error: &'static str, response: String },
}

impl ScriptOutcome {
    /// Interpret a completion, tolerating a Markdown code fence around the JSON
    pub fn from_completion(completion: &str) -> Self {
        match serde_json::from_str::<Script>(strip_code_fence(completion)) {
            Ok(script) => Self::Parsed(script),
            Err(e) => {
                tracing::warn!(error = %e, "completion is not a script");
                Self::Unparsed {
                    error: PARSE_FAILURE_MESSAGE,
                    response: completion.to_owned(),
                }
            }
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (`json`) on the opening fence line
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
