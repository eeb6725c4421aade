//! Config file discovery and layered merging.
//!
//! Resolution order (later overrides earlier, whole sections at a time):
//! 1. `~/.config/larder/larder.toml` (XDG user config)
//! 2. `./larder.toml` (project-local)

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::types::LarderConfig;

/// Config filename, both in the XDG directory and project-local.
const CONFIG_FILE: &str = "larder.toml";

/// Application name for XDG directory resolution.
const APP_NAME: &str = "larder";

/// Path of the user-level config file, when a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}

/// Load a single config file.
pub fn load_file(path: &Path) -> Result<LarderConfig> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    LarderConfig::from_toml(&raw)
}

/// Load configuration by merging the user-level file (if present) with a
/// project-local `larder.toml` (if present). Absent files are skipped;
/// present-but-invalid files are errors.
pub fn load(project_dir: Option<&Path>) -> Result<LarderConfig> {
    let mut config = LarderConfig::new();

    if let Some(path) = user_config_path() {
        if path.exists() {
            config.merge(load_file(&path)?);
        }
    }

    let project_path = project_dir
        .map(|dir| dir.join(CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    if project_path.exists() {
        config.merge(load_file(&project_path)?);
    }

    Ok(config)
}
