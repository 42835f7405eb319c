use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::error;

pub mod command_summarizer;
pub mod dry_run_mailer;
pub mod http_mailer;
pub mod http_summarizer;

pub use command_summarizer::CommandSummarizer;
pub use dry_run_mailer::DryRunMailer;
pub use http_mailer::HttpMailer;
pub use http_summarizer::HttpSummarizer;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorResponse {
    error: Option<String>,
    message: Option<String>,
}

/// Read a JSON body, turning non-2xx answers into errors that carry the
/// service's own message when it sent one.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response, service: &str) -> Result<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .with_context(|| format!("Failed to read {} response body", service))?;

    if !status.is_success() {
        error!("{} request failed with status {}: {}", service, status, body);

        if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(&body) {
            if let Some(message) = parsed.error.or(parsed.message) {
                return Err(anyhow!("{} error ({}): {}", service, status, message));
            }
        }

        return Err(anyhow!(
            "{} request failed with status {}: {}",
            service,
            status,
            body
        ));
    }

    serde_json::from_str(&body).with_context(|| format!("Failed to parse {} response", service))
}
