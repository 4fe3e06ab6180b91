//! OpenAI-compatible HTTP implementation for comment drafting.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::content::PostContent;
use crate::github::PublishError;

use super::drafter::CommentDrafter;
use super::persona::Persona;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Configuration for [`OpenAiCommentDrafter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiDrafterConfig {
    /// Base API URL (e.g., `https://api.openai.com/v1`).
    pub base_url: String,
    /// Model identifier sent in chat-completions requests.
    pub model: String,
    /// API key used for bearer authentication.
    pub api_key: Option<String>,
    /// HTTP timeout.
    pub timeout: Duration,
}

impl Default for OpenAiDrafterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl OpenAiDrafterConfig {
    /// Constructs configuration with required API settings.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            timeout,
        }
    }
}

/// OpenAI-compatible drafting service implementation.
#[derive(Debug, Clone, Default)]
pub struct OpenAiCommentDrafter {
    config: OpenAiDrafterConfig,
}

impl OpenAiCommentDrafter {
    /// Creates a drafter from explicit configuration.
    #[must_use]
    pub const fn new(config: OpenAiDrafterConfig) -> Self {
        Self { config }
    }

    fn extract_api_key(&self) -> Result<&str, PublishError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| PublishError::Configuration {
                message: concat!(
                    "AI API key is required (use --ai-api-key, ",
                    "BANTER_AI_API_KEY, or OPENAI_API_KEY)"
                )
                .to_owned(),
            })
    }

    fn create_http_client(&self) -> Result<Client, PublishError> {
        Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|error| PublishError::Configuration {
                message: format!("failed to configure AI HTTP client: {error}"),
            })
    }
}

#[async_trait]
impl CommentDrafter for OpenAiCommentDrafter {
    async fn draft(&self, post: &PostContent, persona: &Persona) -> Result<String, PublishError> {
        let api_key = self.extract_api_key()?;
        let endpoint = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let payload = ChatCompletionsRequest {
            model: self.config.model.as_str(),
            messages: vec![
                ChatCompletionsMessage {
                    role: "system",
                    content: build_system_prompt(persona),
                },
                ChatCompletionsMessage {
                    role: "user",
                    content: build_prompt(post),
                },
            ],
        };
        let client = self.create_http_client()?;

        let response = client
            .post(endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| PublishError::Network {
                message: format!("AI request transport failed: {error}"),
            })?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().await.map_or_else(
                |_| "(failed to read error response body)".to_owned(),
                |content| truncate_for_message(content.as_str(), 160),
            );
            return Err(PublishError::Api {
                message: format!("AI request failed with status {}: {body}", status.as_u16()),
            });
        }

        let response_payload: ChatCompletionsResponse =
            response.json().await.map_err(|error| PublishError::Api {
                message: format!("AI response JSON decoding failed: {error}"),
            })?;

        response_payload
            .choices
            .first()
            .and_then(|choice| parse_content_value(&choice.message.content))
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .map(ToOwned::to_owned)
            .ok_or_else(|| PublishError::Api {
                message: "AI response did not contain assistant text".to_owned(),
            })
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionsMessage>,
}

#[derive(Debug, Serialize)]
struct ChatCompletionsMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, serde::Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, serde::Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum ChatContent {
    Text(String),
    Parts(Vec<ChatContentPart>),
}

#[derive(Debug, serde::Deserialize)]
struct ChatContentPart {
    text: Option<String>,
    content: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ChatChoiceMessage {
    content: ChatContent,
}

fn build_system_prompt(persona: &Persona) -> String {
    format!(
        concat!(
            "You write discussion-starter comments on blog posts. ",
            "Write as the persona '{}': {} ",
            "Your tone is {}. ",
            "Keep the comment to a few sentences, engage with the post's ",
            "specifics, and do not mention being an AI model."
        ),
        persona.name, persona.description, persona.tone
    )
}

fn build_prompt(post: &PostContent) -> String {
    let mut prompt = String::new();
    prompt.push_str("Post title: ");
    prompt.push_str(post.title.as_str());
    prompt.push('\n');
    prompt.push_str("Post content:\n");
    prompt.push_str(post.body.as_str());
    prompt
}

fn parse_content_value(content: &ChatContent) -> Option<&str> {
    match content {
        ChatContent::Text(text) => Some(text.as_str()),
        ChatContent::Parts(parts) => parts
            .iter()
            .find_map(|part| part.text.as_deref().or(part.content.as_deref())),
    }
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}

#[cfg(test)]
#[path = "openai_tests.rs"]
mod tests;
