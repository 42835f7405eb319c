//! Summary endpoints.
//!
//! - POST /generate         - Generate a summary from the current transcript
//! - POST /edit/toggle      - Switch between rendered and editable summary
//! - PUT  /summary          - Replace the summary text (edit mode only)
//! - GET  /summary/rendered - Rendered summary markup

use axum::{
    extract::State,
    response::{Html, Json},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::{ActionResponse, StateResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::render;
use crate::workflow::WorkflowController;

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub summary: String,
}

pub fn router() -> Router<WorkflowController> {
    Router::new()
        .route("/generate", post(generate))
        .route("/edit/toggle", post(toggle_edit))
        .route("/summary", put(edit_summary))
        .route("/summary/rendered", get(rendered_summary))
}

async fn generate(State(controller): State<WorkflowController>) -> ApiResult<Json<ActionResponse>> {
    info!("Generate command received via API");

    let notification = controller
        .generate_summary()
        .await
        .ok_or_else(|| ApiError::conflict("Summary generation already in progress"))?;

    Ok(Json(ActionResponse::new(notification, &controller)))
}

async fn toggle_edit(State(controller): State<WorkflowController>) -> ApiResult<Json<Value>> {
    let is_editing = controller
        .toggle_edit()
        .ok_or_else(|| ApiError::conflict("No summary to edit"))?;

    Ok(Json(json!({ "is_editing": is_editing })))
}

async fn edit_summary(
    State(controller): State<WorkflowController>,
    Json(req): Json<SummaryRequest>,
) -> ApiResult<Json<StateResponse>> {
    if !controller.edit_summary(req.summary) {
        return Err(ApiError::conflict("Summary is not in edit mode"));
    }

    Ok(Json(StateResponse::capture(&controller)))
}

async fn rendered_summary(State(controller): State<WorkflowController>) -> ApiResult<Html<String>> {
    let session = controller.snapshot();
    if !session.has_summary() {
        return Err(ApiError::not_found("No summary generated yet"));
    }

    Ok(Html(render::render(&session.summary)))
}
