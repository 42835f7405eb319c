use crate::api::ApiServer;
use crate::collaborator::{mailer_from_config, summarizer_from_config};
use crate::config::Config;
use crate::workflow::{SessionState, WorkflowController};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

pub async fn run_service(config: Config) -> Result<()> {
    info!("Starting Minutes service");

    let controller = build_controller(&config)?;

    let api_server = ApiServer::new(controller, &config.server);

    info!("Minutes is ready!");
    info!(
        "Try: curl -X PUT http://{}:{}/transcript -H 'Content-Type: application/json' -d '{{\"transcript\": \"...\"}}'",
        config.server.host, config.server.port
    );

    api_server.start().await
}

/// Wire the configured collaborators into a fresh session.
pub fn build_controller(config: &Config) -> Result<WorkflowController> {
    let summarizer = summarizer_from_config(&config.summarizer)?;
    let mailer = mailer_from_config(&config.mailer)?;

    let session = SessionState::new(
        config.workflow.default_prompt.clone(),
        config.workflow.default_recipient.clone(),
    );

    Ok(WorkflowController::new(
        Arc::from(summarizer),
        Arc::from(mailer),
        session,
    ))
}
