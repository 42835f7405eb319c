//! API route modules.

pub mod email;
pub mod session;
pub mod summary;

use serde::Serialize;

use crate::workflow::{Controls, Notification, SessionState, SummaryView, WorkflowController};

/// Full session snapshot as seen by a client.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    #[serde(flatten)]
    pub session: SessionState,
    pub controls: Controls,
    pub view: SummaryView,
}

impl StateResponse {
    pub fn capture(controller: &WorkflowController) -> Self {
        let session = controller.snapshot();
        Self {
            controls: session.controls(),
            view: session.view(),
            session,
        }
    }
}

/// Result of a user action: its notification plus the state afterwards.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub notification: Notification,
    pub state: StateResponse,
}

impl ActionResponse {
    pub fn new(notification: Notification, controller: &WorkflowController) -> Self {
        Self {
            notification,
            state: StateResponse::capture(controller),
        }
    }
}
