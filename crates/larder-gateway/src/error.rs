//! Error types for the gateway crate.

use thiserror::Error;

/// Result type alias using the gateway error type.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors from the external-service boundary.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Credential exchange failed (network failure or non-2xx).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Transport-level failure talking to the provider.
    #[error("network error: {0}")]
    Network(String),

    /// The provider did not answer within the request deadline.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The speech provider rejected the audio or could not transcribe it.
    /// Carries the provider's error code and message.
    #[error("recognition failed: {message} (err_no {code})")]
    Recognition { code: i64, message: String },

    /// The generative provider refused or failed the completion call.
    #[error("generation failed: {0}")]
    Generation(String),

    /// The provider answered, but the payload was not the shape we asked
    /// for (e.g. the model emitted something other than the requested JSON).
    #[error("malformed provider payload: {0}")]
    Format(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout(err.to_string())
        } else if err.is_connect() {
            GatewayError::Network(format!("connection failed: {err}"))
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}
