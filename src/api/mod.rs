//! REST API server for Minutes.
//!
//! Provides HTTP endpoints for:
//! - Session state (transcript, prompt, recipient)
//! - Summary generation and editing
//! - Email delivery

pub mod error;
pub mod routes;

use crate::config::ServerConfig;
use crate::workflow::WorkflowController;
use anyhow::{Context, Result};
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tracing::info;

pub struct ApiServer {
    host: String,
    port: u16,
    controller: WorkflowController,
}

impl ApiServer {
    pub fn new(controller: WorkflowController, config: &ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            controller,
        }
    }

    pub async fn start(self) -> Result<()> {
        let app = router(self.controller);
        let addr = format!("{}:{}", self.host, self.port);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind API server to {}", addr))?;

        info!("API server listening on http://{}", addr);
        info!("Endpoints:");
        info!("  GET  /                   - Service info");
        info!("  GET  /state              - Session state and controls");
        info!("  PUT  /transcript         - Set transcript text");
        info!("  POST /transcript/upload  - Load transcript file");
        info!("  PUT  /prompt             - Set instruction prompt");
        info!("  PUT  /recipient          - Set recipient email");
        info!("  POST /generate           - Generate summary");
        info!("  POST /edit/toggle        - Toggle summary edit mode");
        info!("  PUT  /summary            - Edit summary text");
        info!("  GET  /summary/rendered   - Rendered summary markup");
        info!("  POST /send               - Email the summary");

        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Build the application router around a controller.
pub fn router(controller: WorkflowController) -> Router {
    Router::new()
        .route("/", get(status))
        .merge(routes::session::router())
        .merge(routes::summary::router())
        .merge(routes::email::router())
        .layer(ServiceBuilder::new())
        .with_state(controller)
}

async fn status() -> Json<Value> {
    Json(json!({
        "service": "minutes",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
