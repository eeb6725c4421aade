//! Chat backend trait and mock implementation.
//!
//! [`ChatBackend`] is the seam between the HTTP client and the content
//! call sites: one system instruction, one user instruction, raw text back.
//! The mock returns queued results in order for deterministic tests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{GatewayError, Result};

/// A chat-completion backend: one system + user prompt in, raw text out.
///
/// Implementations make no promise that the returned text is valid JSON
/// even when the prompt demands it — parsing is the caller's job.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Execute a single completion call. One attempt, no retry.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;

    /// Get the name of this backend.
    fn name(&self) -> &str;
}

/// A backend that can be shared across call sites.
pub type SharedChatBackend = Arc<dyn ChatBackend>;

// ─────────────────────────────────────────────────────────────────────────────
// Mock Backend
// ─────────────────────────────────────────────────────────────────────────────

/// A mock chat backend for testing purposes.
///
/// Returns pre-configured results in order and records every request, so
/// tests can assert both on outputs and on the prompts that were sent.
#[derive(Debug)]
pub struct MockChatBackend {
    name: String,
    responses: std::sync::Mutex<Vec<Result<String>>>,
    request_log: std::sync::Mutex<Vec<(String, String)>>,
}

impl MockChatBackend {
    /// Create a mock with the given queued results.
    pub fn new(responses: Vec<Result<String>>) -> Self {
        Self {
            name: "mock".to_string(),
            responses: std::sync::Mutex::new(responses),
            request_log: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that returns a single text response.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(vec![Ok(text.into())])
    }

    /// All (system, user) prompt pairs sent to this backend.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.request_log.lock().unwrap().clone()
    }

    /// The number of requests made.
    pub fn request_count(&self) -> usize {
        self.request_log.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        self.request_log
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(GatewayError::Generation(
                "MockChatBackend: no more responses available".to_string(),
            ));
        }
        responses.remove(0)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_responses_in_order() {
        let backend = MockChatBackend::new(vec![
            Ok("first".to_string()),
            Ok("second".to_string()),
        ]);

        assert_eq!(backend.complete("sys", "a").await.unwrap(), "first");
        assert_eq!(backend.complete("sys", "b").await.unwrap(), "second");
        assert_eq!(backend.request_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_logs_prompts() {
        let backend = MockChatBackend::with_text("hi");
        backend.complete("system prompt", "user prompt").await.unwrap();

        let requests = backend.requests();
        assert_eq!(requests[0].0, "system prompt");
        assert_eq!(requests[0].1, "user prompt");
    }

    #[tokio::test]
    async fn test_mock_exhausted_is_an_error() {
        let backend = MockChatBackend::new(vec![]);
        let result = backend.complete("sys", "user").await;
        assert!(matches!(result, Err(GatewayError::Generation(_))));
    }
}
