use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use super::read_json;
use crate::collaborator::{GeneratedSummary, Summarizer};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    transcript: &'a str,
    custom_prompt: &'a str,
}

/// Posts `{transcript, customPrompt}` to a summary endpoint and expects
/// `{summary}` back.
pub struct HttpSummarizer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSummarizer {
    pub fn new(endpoint: String) -> Self {
        info!("Initialized HTTP summarizer with endpoint: {}", endpoint);
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    fn name(&self) -> &'static str {
        "HTTP summarizer"
    }

    async fn generate(&self, transcript: &str, instructions: &str) -> Result<GeneratedSummary> {
        debug!(
            "Requesting summary for {} chars of transcript from {}",
            transcript.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&GenerateRequest {
                transcript,
                custom_prompt: instructions,
            })
            .send()
            .await
            .context("Failed to send request to summary service")?;

        let generated: GeneratedSummary = read_json(response, "Summary service").await?;
        info!("Summary received: {} chars", generated.summary.len());

        Ok(generated)
    }
}
