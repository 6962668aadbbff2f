/// LLM Client — the single point of entry for text generation.
///
/// No other module calls the Anthropic API directly. The pipeline only sees
/// the `TextGenerator` trait, so tests swap in a fake without touching HTTP.
///
/// Model: hardcoded, not configurable.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

use crate::llm_client::prompts::RESUME_WRITER_SYSTEM;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for resume-point generation.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.7;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("ANTHROPIC_API_KEY is not set")]
    MissingApiKey,
}

/// Text in, text out. Implementations make at most one attempt per call.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Wraps the Anthropic Messages API. One request per call.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, GenerationError> {
        if api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey);
        }
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, api_key })
    }

    /// Makes a single call to the API and returns the full response object.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, GenerationError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let llm_response: LlmResponse = serde_json::from_str(&body)?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self.call(prompt, RESUME_WRITER_SYSTEM).await?;
        response
            .text()
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
            .ok_or(GenerationError::EmptyContent)
    }
}

/// Pulls `error.message` out of an API error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<AnthropicError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_takes_first_text_block() {
        let response: LlmResponse = serde_json::from_value(serde_json::json!({
            "content": [
                {"type": "thinking", "text": null},
                {"type": "text", "text": "- Shipped the thing"},
                {"type": "text", "text": "ignored"}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 5}
        }))
        .unwrap();
        assert_eq!(response.text(), Some("- Shipped the thing"));
    }

    #[test]
    fn test_response_without_text_block() {
        let response: LlmResponse = serde_json::from_value(serde_json::json!({
            "content": [],
            "usage": {"input_tokens": 10, "output_tokens": 0}
        }))
        .unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_api_error_message_parsed_from_body() {
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        assert_eq!(api_error_message(body.to_string()), "Overloaded");
    }

    #[test]
    fn test_api_error_message_falls_back_to_raw_body() {
        assert_eq!(api_error_message("<html>502</html>".to_string()), "<html>502</html>");
    }

    #[test]
    fn test_request_body_shape() {
        let body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system: RESUME_WRITER_SYSTEM,
            messages: vec![AnthropicMessage {
                role: "user",
                content: "prompt",
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], MODEL);
        assert_eq!(value["max_tokens"], 2000);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "prompt");
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        assert!(matches!(
            LlmClient::new("   ".to_string()),
            Err(GenerationError::MissingApiKey)
        ));
    }
}
