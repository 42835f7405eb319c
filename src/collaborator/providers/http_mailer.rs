use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::read_json;
use crate::collaborator::{DeliveryReceipt, Mailer};

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    email: &'a str,
    summary: &'a str,
}

/// Delivery services report either `success` or `delivered`, and either
/// `isSimulated` or `simulated`; some send both spellings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendResponse {
    #[serde(default)]
    delivered: Option<bool>,
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    simulated: Option<bool>,
    #[serde(default)]
    is_simulated: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

impl SendResponse {
    /// Absent flags mean delivered; any explicit `false` wins.
    fn delivered(&self) -> bool {
        self.delivered.unwrap_or(true) && self.success.unwrap_or(true)
    }

    fn simulated(&self) -> bool {
        self.simulated.unwrap_or(false) || self.is_simulated.unwrap_or(false)
    }
}

/// Posts `{email, summary}` to a delivery endpoint.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMailer {
    pub fn new(endpoint: String) -> Self {
        info!("Initialized HTTP mailer with endpoint: {}", endpoint);
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    fn name(&self) -> &'static str {
        "HTTP mailer"
    }

    async fn send(&self, recipient: &str, body: &str) -> Result<DeliveryReceipt> {
        debug!("Sending {} chars to {} via {}", body.len(), recipient, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&SendRequest {
                email: recipient,
                summary: body,
            })
            .send()
            .await
            .context("Failed to send request to delivery service")?;

        let parsed: SendResponse = read_json(response, "Delivery service").await?;

        Ok(DeliveryReceipt {
            delivered: parsed.delivered(),
            simulated: parsed.simulated(),
            message: parsed.message,
        })
    }
}
