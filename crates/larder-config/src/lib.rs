//! Configuration system for the larder backend.
//!
//! TOML-based configuration with:
//! - Optional `[storage]`, `[speech]`, and `[generative]` sections
//! - Config file layering (XDG user config + project-local overrides)
//! - Credential validation for the configured adapters
//!
//! Credentials themselves come from whatever the host process puts in the
//! files it points us at — this crate does no environment scanning. Config
//! is loaded once at startup and treated as read-only.

pub mod discovery;
pub mod error;
pub mod types;

pub use discovery::{load, load_file, user_config_path};
pub use error::{ConfigError, Result};
pub use types::{GenerativeSettings, LarderConfig, SpeechSettings, StorageSettings};
