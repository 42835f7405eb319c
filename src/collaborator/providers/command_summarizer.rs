//! Summary generation through a local shell command.
//!
//! Lets the workflow run against any CLI model runner: the transcript is
//! piped to stdin, the instructions are exported as an environment
//! variable, and whatever the command prints becomes the summary.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::collaborator::{GeneratedSummary, Summarizer};

/// Environment variable names passed to the summary command.
pub mod command_env {
    pub const INSTRUCTIONS: &str = "MINUTES_INSTRUCTIONS";
    pub const TRANSCRIPT_CHARS: &str = "MINUTES_TRANSCRIPT_CHARS";
}

/// Runs `sh -c <command>`.
/// - Pipes the transcript to stdin
/// - Exports the instructions in `MINUTES_INSTRUCTIONS`
/// - Kills the process on timeout
/// - Non-zero exit or empty output is a failed generation
pub struct CommandSummarizer {
    command: String,
    timeout: Duration,
}

impl CommandSummarizer {
    pub fn new(command: String, timeout: Duration) -> Self {
        info!("Initialized command summarizer: {}", command);
        Self { command, timeout }
    }
}

#[async_trait]
impl Summarizer for CommandSummarizer {
    fn name(&self) -> &'static str {
        "command summarizer"
    }

    async fn generate(&self, transcript: &str, instructions: &str) -> Result<GeneratedSummary> {
        debug!("Running summary command: {}", self.command);

        let mut child = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .env(command_env::INSTRUCTIONS, instructions)
            .env(command_env::TRANSCRIPT_CHARS, transcript.chars().count().to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to spawn summary command '{}'", self.command))?;

        // The child may fill stdout before it drains stdin, so write from a separate task.
        if let Some(mut stdin) = child.stdin.take() {
            let transcript = transcript.to_string();
            tokio::spawn(async move {
                if let Err(e) = stdin.write_all(transcript.as_bytes()).await {
                    debug!("Summary command closed stdin early: {}", e);
                }
            });
        }

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.context("Failed to wait for summary command")?,
            Err(_) => {
                warn!(
                    "Summary command timed out after {}s (process will be killed)",
                    self.timeout.as_secs()
                );
                bail!(
                    "Summary command timed out after {}s",
                    self.timeout.as_secs()
                );
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "Summary command exited with status {}: {}",
                output.status,
                stderr.trim()
            ));
        }

        let summary = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if summary.is_empty() {
            bail!("Summary command produced no output");
        }

        info!("Summary command complete: {} chars", summary.len());
        Ok(GeneratedSummary { summary })
    }
}
