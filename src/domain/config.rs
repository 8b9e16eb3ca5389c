//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Every field has a default, so a missing file or a partial one is fine.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "data/config.yaml";
const APP_DIR: &str = "errand";

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The local model that translates requests into intents.
#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    #[serde(default = "default_model_command")]
    pub command: String,
    #[serde(default = "default_model_name")]
    pub name: String,
    /// Seconds to wait for the model. `None` waits forever.
    #[serde(default = "default_model_timeout")]
    pub timeout: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            command: default_model_command(),
            name: default_model_name(),
            timeout: default_model_timeout(),
        }
    }
}

fn default_model_command() -> String {
    "ollama".to_string()
}
fn default_model_name() -> String {
    "llama3.2".to_string()
}
fn default_model_timeout() -> Option<u64> {
    Some(120)
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct CommandsConfig {
    /// Seconds before a captured command is killed. `None` waits forever.
    #[serde(default)]
    pub timeout: Option<u64>,
    /// Overrides `PATH` for the executable search.
    #[serde(default)]
    pub search_path: Option<String>,
    /// Helper used instead of the desktop default opener.
    #[serde(default)]
    pub opener: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Also log to stderr.
    #[serde(default)]
    pub console: bool,
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            console: false,
            level: default_log_level(),
        }
    }
}

fn default_log_dir() -> String {
    "data".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Picks the file to load: the explicit path as given (it must then exist),
    /// otherwise the first existing candidate. `None` means built-in defaults.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        Self::candidates().into_iter().find(|c| c.is_file())
    }

    /// Loads the located file, or defaults when there is none.
    pub fn load(source: Option<&Path>) -> Result<Self> {
        match source {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not to a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    fn candidates() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_PATH)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join(APP_DIR).join("config.yaml"));
        }
        paths
    }
}
