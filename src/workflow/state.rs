//! Session state and derived view/controls.

use serde::{Deserialize, Serialize};

use crate::render;

/// Phase of one kind of collaborator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallPhase {
    Idle,
    Pending,
}

impl CallPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
        }
    }
}

impl From<bool> for CallPhase {
    fn from(in_flight: bool) -> Self {
        if in_flight {
            Self::Pending
        } else {
            Self::Idle
        }
    }
}

/// Everything the user can see for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub transcript: String,
    pub instruction_prompt: String,
    pub summary: String,
    pub recipient_email: String,
    pub is_generating: bool,
    pub is_sending: bool,
    pub is_editing: bool,
}

impl SessionState {
    pub fn new(instruction_prompt: impl Into<String>, recipient_email: impl Into<String>) -> Self {
        Self {
            transcript: String::new(),
            instruction_prompt: instruction_prompt.into(),
            summary: String::new(),
            recipient_email: recipient_email.into(),
            is_generating: false,
            is_sending: false,
            is_editing: false,
        }
    }

    /// Gates both the summary panel and the email panel.
    pub fn has_summary(&self) -> bool {
        !self.summary.is_empty()
    }

    pub fn generation_phase(&self) -> CallPhase {
        self.is_generating.into()
    }

    pub fn delivery_phase(&self) -> CallPhase {
        self.is_sending.into()
    }

    pub fn controls(&self) -> Controls {
        let summary_visible = self.has_summary();
        Controls {
            generate_enabled: !self.is_generating && !self.transcript.trim().is_empty(),
            send_enabled: summary_visible
                && !self.is_sending
                && !self.recipient_email.trim().is_empty()
                && !self.summary.trim().is_empty(),
            summary_visible,
            email_visible: summary_visible,
            edit_label: if self.is_editing { "Save" } else { "Edit" },
        }
    }

    pub fn view(&self) -> SummaryView {
        if !self.has_summary() {
            SummaryView::Hidden
        } else if self.is_editing {
            SummaryView::Editing(self.summary.clone())
        } else {
            SummaryView::Rendered(render::render(&self.summary))
        }
    }
}

/// Enabled/visible state of the user-facing controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub generate_enabled: bool,
    pub send_enabled: bool,
    pub summary_visible: bool,
    pub email_visible: bool,
    pub edit_label: &'static str,
}

/// How the summary panel should be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "content", rename_all = "lowercase")]
pub enum SummaryView {
    Hidden,
    Editing(String),
    Rendered(String),
}
