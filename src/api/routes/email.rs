//! Email delivery endpoint.
//!
//! - POST /send - Send the current summary to the current recipient

use axum::{extract::State, response::Json, routing::post, Router};
use tracing::info;

use super::ActionResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::workflow::WorkflowController;

pub fn router() -> Router<WorkflowController> {
    Router::new().route("/send", post(send_summary))
}

async fn send_summary(
    State(controller): State<WorkflowController>,
) -> ApiResult<Json<ActionResponse>> {
    info!("Send command received via API");

    let notification = controller
        .send_summary()
        .await
        .ok_or_else(|| ApiError::conflict("Email delivery already in progress"))?;

    Ok(Json(ActionResponse::new(notification, &controller)))
}
