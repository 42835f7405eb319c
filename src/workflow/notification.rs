//! User-facing notifications emitted after every workflow action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::WorkflowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Neutral,
    Destructive,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Destructive => "destructive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    FileLoaded,
    UnsupportedFileType,
    EmptyTranscript,
    SummaryGenerated,
    GenerationFailed,
    MissingSendFields,
    EmailSent,
    EmailSimulated,
    SendFailed,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileLoaded => "file_loaded",
            Self::UnsupportedFileType => "unsupported_file_type",
            Self::EmptyTranscript => "empty_transcript",
            Self::SummaryGenerated => "summary_generated",
            Self::GenerationFailed => "generation_failed",
            Self::MissingSendFields => "missing_send_fields",
            Self::EmailSent => "email_sent",
            Self::EmailSimulated => "email_simulated",
            Self::SendFailed => "send_failed",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::FileLoaded | Self::SummaryGenerated | Self::EmailSent | Self::EmailSimulated => {
                Severity::Neutral
            }
            _ => Severity::Destructive,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::FileLoaded => "File uploaded successfully",
            Self::UnsupportedFileType => "Invalid file type",
            Self::EmptyTranscript => "No transcript provided",
            Self::SummaryGenerated => "Summary generated!",
            Self::GenerationFailed => "Error generating summary",
            Self::MissingSendFields => "Missing information",
            Self::EmailSent => "Email sent!",
            Self::EmailSimulated => "Email simulated",
            Self::SendFailed => "Error sending email",
        }
    }
}

/// Successful action results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    FileLoaded,
    SummaryGenerated,
    EmailSent { recipient: String },
    EmailSimulated { message: String },
}

/// Transient message describing the result of one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub issued_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            description: description.into(),
            severity: kind.severity(),
            issued_at: Utc::now(),
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

impl From<Outcome> for Notification {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::FileLoaded => Notification::new(
                NotificationKind::FileLoaded,
                "Your transcript has been loaded and is ready for processing.",
            ),
            Outcome::SummaryGenerated => Notification::new(
                NotificationKind::SummaryGenerated,
                "Your meeting summary has been created successfully.",
            ),
            Outcome::EmailSent { recipient } => Notification::new(
                NotificationKind::EmailSent,
                format!("Meeting summary has been sent to {}", recipient),
            ),
            Outcome::EmailSimulated { message } => {
                Notification::new(NotificationKind::EmailSimulated, message)
            }
        }
    }
}

impl From<WorkflowError> for Notification {
    fn from(err: WorkflowError) -> Self {
        let description = match &err {
            WorkflowError::UnsupportedFileType { .. } => {
                "Please upload a .txt file containing your meeting transcript."
            }
            WorkflowError::EmptyTranscript => {
                "Please upload a transcript file or paste your meeting notes."
            }
            WorkflowError::GenerationFailed { .. } => {
                "There was an issue processing your transcript. Please try again."
            }
            WorkflowError::MissingSendFields => {
                "Please provide an email address and generate a summary first."
            }
            WorkflowError::SendFailed { .. } => {
                "There was an issue sending the email. Please try again."
            }
        };
        Notification::new(err.kind(), description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_by_kind() {
        assert_eq!(NotificationKind::FileLoaded.severity(), Severity::Neutral);
        assert_eq!(NotificationKind::EmailSimulated.severity(), Severity::Neutral);
        assert_eq!(NotificationKind::EmptyTranscript.severity(), Severity::Destructive);
        assert_eq!(NotificationKind::SendFailed.severity(), Severity::Destructive);
    }

    #[test]
    fn test_email_sent_names_recipient() {
        let n = Notification::from(Outcome::EmailSent {
            recipient: "ops@example.com".to_string(),
        });
        assert_eq!(n.kind, NotificationKind::EmailSent);
        assert_eq!(n.title, "Email sent!");
        assert!(n.description.contains("ops@example.com"));
        assert!(!n.is_destructive());
    }

    #[test]
    fn test_simulated_carries_message() {
        let n = Notification::from(Outcome::EmailSimulated {
            message: "sandbox limit".to_string(),
        });
        assert_eq!(n.description, "sandbox limit");
        assert_eq!(n.severity, Severity::Neutral);
    }

    #[test]
    fn test_error_notification_is_destructive() {
        let n = Notification::from(WorkflowError::GenerationFailed {
            reason: "status 500".to_string(),
        });
        assert_eq!(n.kind, NotificationKind::GenerationFailed);
        assert!(n.is_destructive());
        assert!(!n.description.contains("status 500"));
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&NotificationKind::UnsupportedFileType).unwrap();
        assert_eq!(json, "\"unsupported_file_type\"");
        assert_eq!(
            NotificationKind::UnsupportedFileType.as_str(),
            "unsupported_file_type"
        );
    }
}
