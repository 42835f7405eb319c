//! Session field endpoints.
//!
//! - GET  /state             - Session snapshot, controls and summary view
//! - PUT  /transcript        - Replace the transcript text
//! - POST /transcript/upload - Load a transcript file (content + declared type)
//! - PUT  /prompt            - Replace the instruction prompt
//! - PUT  /recipient         - Replace the recipient address

use axum::{
    extract::State,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use tracing::info;

use super::{ActionResponse, StateResponse};
use crate::workflow::WorkflowController;

#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    pub transcript: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub content: String,
    pub mime_type: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct RecipientRequest {
    pub email: String,
}

pub fn router() -> Router<WorkflowController> {
    Router::new()
        .route("/state", get(get_state))
        .route("/transcript", put(set_transcript))
        .route("/transcript/upload", post(upload_transcript))
        .route("/prompt", put(set_prompt))
        .route("/recipient", put(set_recipient))
}

async fn get_state(State(controller): State<WorkflowController>) -> Json<StateResponse> {
    Json(StateResponse::capture(&controller))
}

async fn set_transcript(
    State(controller): State<WorkflowController>,
    Json(req): Json<TranscriptRequest>,
) -> Json<StateResponse> {
    controller.set_transcript(req.transcript);
    Json(StateResponse::capture(&controller))
}

async fn upload_transcript(
    State(controller): State<WorkflowController>,
    Json(req): Json<UploadRequest>,
) -> Json<ActionResponse> {
    info!(
        "Transcript upload received: {} ({})",
        req.file_name.as_deref().unwrap_or("unnamed"),
        req.mime_type
    );
    let notification = controller.load_transcript(req.content, &req.mime_type);
    Json(ActionResponse::new(notification, &controller))
}

async fn set_prompt(
    State(controller): State<WorkflowController>,
    Json(req): Json<PromptRequest>,
) -> Json<StateResponse> {
    controller.set_instruction_prompt(req.prompt);
    Json(StateResponse::capture(&controller))
}

async fn set_recipient(
    State(controller): State<WorkflowController>,
    Json(req): Json<RecipientRequest>,
) -> Json<StateResponse> {
    controller.set_recipient_email(req.email);
    Json(StateResponse::capture(&controller))
}
