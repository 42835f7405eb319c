use crate::global;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_INSTRUCTION_PROMPT: &str = "Please summarize this meeting transcript, highlighting key decisions, action items, and important discussion points.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub workflow: WorkflowConfig,
    pub summarizer: SummarizerConfig,
    pub mailer: MailerConfig,
    pub server: ServerConfig,
}

/// Initial values for a new session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub default_prompt: String,
    /// Preset recipient shown in the email field. Providers on a sandbox
    /// tier may only deliver to this address.
    pub default_recipient: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// `http` or `command`
    pub provider: String,
    pub endpoint: Option<String>,
    /// Shell command for the `command` provider. Receives the transcript on
    /// stdin and the instructions in MINUTES_INSTRUCTIONS.
    pub command: Option<String>,
    pub command_timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailerConfig {
    /// `http` or `dry-run`
    pub provider: String,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            default_prompt: DEFAULT_INSTRUCTION_PROMPT.to_string(),
            default_recipient: "team@example.com".to_string(),
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            provider: "http".to_string(),
            endpoint: Some("http://127.0.0.1:3000/api/generate-summary".to_string()),
            command: None,
            command_timeout_seconds: 300,
        }
    }
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            provider: "http".to_string(),
            endpoint: Some("http://127.0.0.1:3000/api/send-email".to_string()),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3838,
        }
    }
}

impl Config {
    /// Load from the default location, writing a default file if none exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit path. A missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}
