use thiserror::Error;

use super::notification::NotificationKind;

/// Failures of a user action. None of these escape the controller: each is
/// converted into a destructive notification at the operation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("unsupported file type '{mime_type}', expected text/plain")]
    UnsupportedFileType { mime_type: String },

    #[error("no transcript provided")]
    EmptyTranscript,

    #[error("summary generation failed: {reason}")]
    GenerationFailed { reason: String },

    #[error("an email address and a summary are both required")]
    MissingSendFields,

    #[error("email delivery failed: {reason}")]
    SendFailed { reason: String },
}

impl WorkflowError {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::UnsupportedFileType { .. } => NotificationKind::UnsupportedFileType,
            Self::EmptyTranscript => NotificationKind::EmptyTranscript,
            Self::GenerationFailed { .. } => NotificationKind::GenerationFailed,
            Self::MissingSendFields => NotificationKind::MissingSendFields,
            Self::SendFailed { .. } => NotificationKind::SendFailed,
        }
    }
}
