//! Generative content adapter over an OpenAI-compatible chat endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::backend::ChatBackend;
use crate::error::{GatewayError, Result};

/// Default chat-completions endpoint.
const DEFAULT_API_URL: &str = "https://ark.cn-beijing.volces.com/api/v3/chat/completions";

/// Default model identifier.
const DEFAULT_MODEL: &str = "doubao-seed-1-6-flash-250715";

/// Default deadline for completion calls.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for the generative content adapter.
#[derive(Debug, Clone)]
pub struct GenerativeConfig {
    /// Bearer key for the provider.
    pub api_key: String,

    /// Chat-completions endpoint.
    pub api_url: String,

    /// Model identifier.
    pub model: String,

    /// Deadline for each completion call.
    pub timeout: Duration,
}

impl GenerativeConfig {
    /// Create a config with the default endpoint and model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set a custom endpoint.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the completion deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// Chat-completion client for the generative provider.
pub struct GenerativeClient {
    client: reqwest::Client,
    config: GenerativeConfig,
}

impl GenerativeClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GenerativeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ChatBackend for GenerativeClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            stream: false,
        };

        tracing::debug!(model = %self.config.model, "sending chat completion request");

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Generation(format!(
                "provider returned {status}: {body}"
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Format(format!("malformed completion response: {e}")))?;

        extract_content(body)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

/// Pull the first choice's message text out of a completion response.
fn extract_content(body: ChatResponse) -> Result<String> {
    body.choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| GatewayError::Format("completion response contained no choices".to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GenerativeConfig::new("key");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_config_builder() {
        let config = GenerativeConfig::new("key")
            .with_api_url("http://localhost:8000/v1/chat/completions")
            .with_model("test-model")
            .with_timeout(Duration::from_secs(10));

        assert_eq!(config.api_url, "http://localhost:8000/v1/chat/completions");
        assert_eq!(config.model, "test-model");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "test-model",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "be brief",
                },
                ChatMessage {
                    role: "user",
                    content: "hello",
                },
            ],
            stream: false,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hello");
    }

    #[test]
    fn test_extract_content_takes_first_choice() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "{\"name\": \"stew\"}"}}]}"#,
        )
        .unwrap();

        assert_eq!(extract_content(body).unwrap(), "{\"name\": \"stew\"}");
    }

    #[test]
    fn test_extract_content_empty_choices_is_format_error() {
        let body: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            extract_content(body),
            Err(GatewayError::Format(_))
        ));
    }
}
