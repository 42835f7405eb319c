//! Meeting summary workflow.
//!
//! Holds the session state, sequences the user actions against the
//! summarizer and mailer collaborators, and reports every outcome as a
//! notification.

pub mod controller;
pub mod error;
pub mod notification;
pub mod state;

pub use controller::{is_plain_text, WorkflowController};
pub use error::WorkflowError;
pub use notification::{Notification, NotificationKind, Outcome, Severity};
pub use state::{CallPhase, Controls, SessionState, SummaryView};
