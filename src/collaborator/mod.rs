//! External collaborators: summary generation and email delivery.
//!
//! The workflow only ever talks to these through the [`Summarizer`] and
//! [`Mailer`] traits. Concrete providers are chosen by name from config.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use crate::config::{MailerConfig, SummarizerConfig};

pub mod providers;

pub use providers::{CommandSummarizer, DryRunMailer, HttpMailer, HttpSummarizer};

pub const SUPPORTED_SUMMARIZERS: &[&str] = &["http", "command"];
pub const SUPPORTED_MAILERS: &[&str] = &["http", "dry-run"];

/// Text returned by a successful generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSummary {
    pub summary: String,
}

/// Answer from the delivery service for an accepted send request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub delivered: bool,
    /// Accepted but not actually transmitted (e.g. sandbox recipient limits).
    pub simulated: bool,
    pub message: Option<String>,
}

impl DeliveryReceipt {
    pub fn delivered() -> Self {
        Self {
            delivered: true,
            simulated: false,
            message: None,
        }
    }

    pub fn simulated(message: impl Into<String>) -> Self {
        Self {
            delivered: true,
            simulated: true,
            message: Some(message.into()),
        }
    }
}

/// Turns a transcript plus instructions into a summary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, transcript: &str, instructions: &str) -> Result<GeneratedSummary>;
}

/// Delivers a summary body to a recipient.
#[async_trait]
pub trait Mailer: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send(&self, recipient: &str, body: &str) -> Result<DeliveryReceipt>;
}

pub fn summarizer_from_config(config: &SummarizerConfig) -> Result<Box<dyn Summarizer>> {
    let summarizer: Box<dyn Summarizer> = match config.provider.as_str() {
        "http" => {
            let endpoint = config
                .endpoint
                .clone()
                .context("endpoint is required for the http summarizer")?;
            Box::new(HttpSummarizer::new(endpoint))
        }
        "command" => {
            let command = config
                .command
                .clone()
                .filter(|c| !c.trim().is_empty())
                .context("command is required for the command summarizer")?;
            Box::new(CommandSummarizer::new(
                command,
                Duration::from_secs(config.command_timeout_seconds),
            ))
        }
        other => bail!(
            "Unknown summarizer provider '{}'. Supported providers: {}",
            other,
            SUPPORTED_SUMMARIZERS.join(", ")
        ),
    };

    info!("Using {} for summary generation", summarizer.name());
    Ok(summarizer)
}

pub fn mailer_from_config(config: &MailerConfig) -> Result<Box<dyn Mailer>> {
    let mailer: Box<dyn Mailer> = match config.provider.as_str() {
        "http" => {
            let endpoint = config
                .endpoint
                .clone()
                .context("endpoint is required for the http mailer")?;
            Box::new(HttpMailer::new(endpoint))
        }
        "dry-run" => Box::new(DryRunMailer),
        other => bail!(
            "Unknown mailer provider '{}'. Supported providers: {}",
            other,
            SUPPORTED_MAILERS.join(", ")
        ),
    };

    info!("Using {} for email delivery", mailer.name());
    Ok(mailer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarizer_from_default_config() {
        let summarizer = summarizer_from_config(&SummarizerConfig::default()).unwrap();
        assert_eq!(summarizer.name(), "HTTP summarizer");
    }

    #[test]
    fn test_command_summarizer_requires_command() {
        let config = SummarizerConfig {
            provider: "command".to_string(),
            command: Some("   ".to_string()),
            ..SummarizerConfig::default()
        };
        let err = summarizer_from_config(&config).err().unwrap();
        assert!(err.to_string().contains("command is required"));
    }

    #[test]
    fn test_unknown_summarizer_rejected() {
        let config = SummarizerConfig {
            provider: "carrier-pigeon".to_string(),
            ..SummarizerConfig::default()
        };
        let err = summarizer_from_config(&config).err().unwrap();
        assert!(err.to_string().contains("http, command"));
    }

    #[test]
    fn test_mailer_selection() {
        let dry = MailerConfig {
            provider: "dry-run".to_string(),
            endpoint: None,
        };
        assert_eq!(mailer_from_config(&dry).unwrap().name(), "dry-run mailer");

        let http_without_endpoint = MailerConfig {
            provider: "http".to_string(),
            endpoint: None,
        };
        assert!(mailer_from_config(&http_without_endpoint).is_err());
    }

    #[test]
    fn test_receipt_constructors() {
        assert!(!DeliveryReceipt::delivered().simulated);
        let receipt = DeliveryReceipt::simulated("sandbox limit");
        assert!(receipt.delivered);
        assert!(receipt.simulated);
        assert_eq!(receipt.message.as_deref(), Some("sandbox limit"));
    }
}
