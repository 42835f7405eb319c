use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::collaborator::{DeliveryReceipt, Mailer};

/// Accepts every send without delivering anything.
pub struct DryRunMailer;

#[async_trait]
impl Mailer for DryRunMailer {
    fn name(&self) -> &'static str {
        "dry-run mailer"
    }

    async fn send(&self, recipient: &str, body: &str) -> Result<DeliveryReceipt> {
        info!(
            "Dry-run delivery to {} ({} chars), nothing sent",
            recipient,
            body.len()
        );

        Ok(DeliveryReceipt::simulated(format!(
            "Email delivery is disabled (dry-run mailer); the summary was not sent to {}.",
            recipient
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dry_run_is_simulated() {
        let receipt = DryRunMailer.send("team@example.com", "notes").await.unwrap();
        assert!(receipt.simulated);
        assert!(receipt.message.unwrap().contains("team@example.com"));
    }
}
