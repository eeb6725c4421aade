//! Configuration types mapping to the TOML schema.
//!
//! ```toml
//! [storage]               # document store location
//! [speech]                # speech recognition credentials + endpoints
//! [generative]            # chat-completion credentials + model
//! ```
//!
//! All sections are optional so partial configs (e.g., project-local
//! overrides) can be loaded and merged. Values are read once at startup
//! and treated as read-only afterwards.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default deadline for speech recognition requests.
const DEFAULT_SPEECH_TIMEOUT_SECS: u64 = 30;

/// Default deadline for generative completion requests.
const DEFAULT_GENERATIVE_TIMEOUT_SECS: u64 = 60;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LarderConfig {
    /// Document store settings.
    pub storage: Option<StorageSettings>,

    /// Speech recognition adapter settings.
    pub speech: Option<SpeechSettings>,

    /// Generative content adapter settings.
    pub generative: Option<GenerativeSettings>,
}

impl LarderConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge another config on top of this one (other takes priority,
    /// whole sections at a time).
    pub fn merge(&mut self, other: LarderConfig) {
        if other.storage.is_some() {
            self.storage = other.storage;
        }
        if other.speech.is_some() {
            self.speech = other.speech;
        }
        if other.generative.is_some() {
            self.generative = other.generative;
        }
    }

    /// Check that every configured adapter section carries its credentials.
    pub fn validate(&self) -> Result<()> {
        if let Some(speech) = &self.speech {
            if speech.api_key.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "api_key",
                    section: "speech",
                });
            }
            if speech.secret_key.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "secret_key",
                    section: "speech",
                });
            }
        }
        if let Some(generative) = &self.generative {
            if generative.api_key.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "api_key",
                    section: "generative",
                });
            }
        }
        Ok(())
    }

    /// The data directory, falling back to the platform default.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .as_ref()
            .map(|s| s.data_dir.clone())
            .unwrap_or_else(StorageSettings::default_data_dir)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

/// `[storage]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory holding the JSON collections.
    pub data_dir: PathBuf,
}

impl StorageSettings {
    /// Platform data dir + `larder`, or `./data` when unavailable.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("larder"))
            .unwrap_or_else(|| PathBuf::from("data"))
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
        }
    }
}

/// `[speech]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    /// Client id for credential exchange.
    pub api_key: String,

    /// Client secret for credential exchange.
    pub secret_key: String,

    /// Override for the credential-exchange endpoint.
    pub token_url: Option<String>,

    /// Override for the transcription endpoint.
    pub recognize_url: Option<String>,

    /// Recognition request deadline in seconds.
    #[serde(default = "default_speech_timeout")]
    pub timeout_secs: u64,
}

impl SpeechSettings {
    /// The recognition deadline as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            secret_key: String::new(),
            token_url: None,
            recognize_url: None,
            timeout_secs: DEFAULT_SPEECH_TIMEOUT_SECS,
        }
    }
}

fn default_speech_timeout() -> u64 {
    DEFAULT_SPEECH_TIMEOUT_SECS
}

/// `[generative]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerativeSettings {
    /// Bearer key for the provider.
    pub api_key: String,

    /// Override for the chat-completions endpoint.
    pub api_url: Option<String>,

    /// Override for the model identifier.
    pub model: Option<String>,

    /// Completion request deadline in seconds.
    #[serde(default = "default_generative_timeout")]
    pub timeout_secs: u64,
}

impl GenerativeSettings {
    /// The completion deadline as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GenerativeSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: None,
            model: None,
            timeout_secs: DEFAULT_GENERATIVE_TIMEOUT_SECS,
        }
    }
}

fn default_generative_timeout() -> u64 {
    DEFAULT_GENERATIVE_TIMEOUT_SECS
}
