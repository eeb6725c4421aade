//! Speech recognition adapter.
//!
//! Wraps the provider's two-step flow: exchange client credentials for a
//! bearer token, then submit base64-encoded PCM audio for transcription.
//! Stateless by design — every call re-acquires a token, and nothing is
//! retried; a failure is reported to the caller immediately.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};

/// Default credential-exchange endpoint.
const DEFAULT_TOKEN_URL: &str = "https://aip.baidubce.com/oauth/2.0/token";

/// Default transcription endpoint.
const DEFAULT_RECOGNIZE_URL: &str = "https://vop.baidu.com/server_api";

/// Deadline for the transcription request.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Sample rate the provider recommends for speech audio.
pub const DEFAULT_SAMPLE_RATE: u32 = 16000;

/// Raw PCM, the only format the app records in.
const AUDIO_FORMAT: &str = "pcm";

/// Mono audio.
const CHANNEL_COUNT: u32 = 1;

/// Device identifier sent with every request.
const DEVICE_ID: &str = "cooking_app";

/// Mandarin general-purpose recognition model.
const MANDARIN_MODEL: u32 = 1537;

/// Provider success sentinel in the response's `err_no`.
const ERR_OK: i64 = 0;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for the speech recognition adapter.
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// Client id for credential exchange.
    pub api_key: String,

    /// Client secret for credential exchange.
    pub secret_key: String,

    /// Credential-exchange endpoint.
    pub token_url: String,

    /// Transcription endpoint.
    pub recognize_url: String,

    /// Deadline for the transcription request.
    pub timeout: Duration,
}

impl SpeechConfig {
    /// Create a config with the default provider endpoints.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            recognize_url: DEFAULT_RECOGNIZE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set a custom credential-exchange endpoint.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Set a custom transcription endpoint.
    pub fn with_recognize_url(mut self, url: impl Into<String>) -> Self {
        self.recognize_url = url.into();
        self
    }

    /// Set the transcription request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// Speech recognition client.
pub struct SpeechClient {
    client: reqwest::Client,
    config: SpeechConfig,
}

impl SpeechClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SpeechConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| GatewayError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Transcribe raw PCM audio, returning the first transcript candidate.
    ///
    /// `sample_rate` is the audio's sample rate; [`DEFAULT_SAMPLE_RATE`] is
    /// what the recorder produces. One attempt, 30-second deadline.
    pub async fn recognize(&self, audio: &[u8], sample_rate: u32) -> Result<String> {
        let token = self.fetch_access_token().await?;
        tracing::debug!(bytes = audio.len(), sample_rate, "submitting audio for recognition");

        let request = RecognizeRequest {
            format: AUDIO_FORMAT,
            rate: sample_rate,
            channel: CHANNEL_COUNT,
            cuid: DEVICE_ID,
            token: &token,
            speech: STANDARD.encode(audio),
            len: audio.len(),
            dev_pid: MANDARIN_MODEL,
        };

        let response = self
            .client
            .post(&self.config.recognize_url)
            .timeout(self.config.timeout)
            .json(&request)
            .send()
            .await?;

        let body: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Format(format!("malformed recognition response: {e}")))?;

        let transcript = first_transcript(body)?;
        tracing::debug!(transcript = %transcript, "recognition succeeded");
        Ok(transcript)
    }

    /// Exchange the configured client credentials for a bearer token.
    ///
    /// Any failure here — transport or a non-2xx status — is an auth
    /// failure from the caller's point of view.
    async fn fetch_access_token(&self) -> Result<String> {
        let response = self
            .client
            .post(&self.config.token_url)
            .query(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.api_key.as_str()),
                ("client_secret", self.config.secret_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| GatewayError::Auth(format!("token request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(GatewayError::Auth(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Auth(format!("malformed token response: {e}")))?;
        Ok(token.access_token)
    }
}

/// Extract the transcript from a provider response.
///
/// `err_no == 0` with a non-empty result list yields the first candidate;
/// anything else is a recognition failure carrying the provider's code.
fn first_transcript(body: RecognizeResponse) -> Result<String> {
    if body.err_no != ERR_OK {
        return Err(GatewayError::Recognition {
            code: body.err_no,
            message: body
                .err_msg
                .unwrap_or_else(|| "unknown provider error".to_string()),
        });
    }

    body.result
        .into_iter()
        .flatten()
        .next()
        .ok_or(GatewayError::Recognition {
            code: ERR_OK,
            message: "recognition produced no transcript".to_string(),
        })
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    format: &'a str,
    rate: u32,
    channel: u32,
    cuid: &'a str,
    token: &'a str,
    speech: String,
    len: usize,
    dev_pid: u32,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    err_no: i64,
    #[serde(default)]
    err_msg: Option<String>,
    #[serde(default)]
    result: Option<Vec<String>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SpeechConfig::new("key", "secret");
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.recognize_url, DEFAULT_RECOGNIZE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_builder() {
        let config = SpeechConfig::new("key", "secret")
            .with_token_url("http://localhost:9000/token")
            .with_recognize_url("http://localhost:9000/asr")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.token_url, "http://localhost:9000/token");
        assert_eq!(config.recognize_url, "http://localhost:9000/asr");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_request_carries_fixed_parameters() {
        let audio = [0u8, 1, 2, 3];
        let request = RecognizeRequest {
            format: AUDIO_FORMAT,
            rate: DEFAULT_SAMPLE_RATE,
            channel: CHANNEL_COUNT,
            cuid: DEVICE_ID,
            token: "tok",
            speech: STANDARD.encode(audio),
            len: audio.len(),
            dev_pid: MANDARIN_MODEL,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["format"], "pcm");
        assert_eq!(json["channel"], 1);
        assert_eq!(json["cuid"], "cooking_app");
        assert_eq!(json["dev_pid"], 1537);
        // len is the raw byte count, not the base64 length.
        assert_eq!(json["len"], 4);
        assert_eq!(json["speech"], STANDARD.encode(audio));
    }

    #[test]
    fn test_successful_response_yields_first_candidate() {
        let body: RecognizeResponse = serde_json::from_str(
            r#"{"err_no": 0, "err_msg": "success.", "result": ["番茄炒蛋", "番茄抄蛋"]}"#,
        )
        .unwrap();

        assert_eq!(first_transcript(body).unwrap(), "番茄炒蛋");
    }

    #[test]
    fn test_provider_error_code_is_preserved() {
        let body: RecognizeResponse = serde_json::from_str(
            r#"{"err_no": 3301, "err_msg": "audio quality error"}"#,
        )
        .unwrap();

        match first_transcript(body) {
            Err(GatewayError::Recognition { code, message }) => {
                assert_eq!(code, 3301);
                assert_eq!(message, "audio quality error");
            }
            other => panic!("expected recognition error, got {other:?}"),
        }
    }

    #[test]
    fn test_success_code_with_empty_result_is_an_error() {
        let body: RecognizeResponse =
            serde_json::from_str(r#"{"err_no": 0, "result": []}"#).unwrap();

        assert!(matches!(
            first_transcript(body),
            Err(GatewayError::Recognition { code: 0, .. })
        ));
    }

    #[test]
    fn test_missing_fields_deserialize() {
        let body: RecognizeResponse = serde_json::from_str(r#"{"err_no": 2000}"#).unwrap();
        assert!(body.err_msg.is_none());
        assert!(body.result.is_none());
    }
}
