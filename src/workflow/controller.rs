//! Workflow orchestrator.
//!
//! Sequences the four user actions:
//! load transcript → generate summary → (toggle edit) → send email
//!
//! Collaborators are injected via constructor. Every action ends in exactly
//! one [`Notification`], except a generate/send issued while a call of the
//! same kind is already in flight, which is a no-op.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::collaborator::{Mailer, Summarizer};

use super::error::WorkflowError;
use super::notification::{Notification, Outcome, Severity};
use super::state::{Controls, SessionState, SummaryView};

const NOTIFICATION_CAPACITY: usize = 32;
const PLAIN_TEXT_MIME: &str = "text/plain";

/// True when a declared content type means plain text. Parameters such as
/// `charset` are ignored.
pub fn is_plain_text(declared_mime_type: &str) -> bool {
    declared_mime_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(PLAIN_TEXT_MIME))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallKind {
    Generation,
    Delivery,
}

impl CallKind {
    fn flag(self, session: &mut SessionState) -> &mut bool {
        match self {
            Self::Generation => &mut session.is_generating,
            Self::Delivery => &mut session.is_sending,
        }
    }
}

/// Owns the pending flag of one in-flight call. Settling clears the flag
/// under the caller's lock; dropping an unsettled guard clears it too.
struct PendingGuard {
    session: Arc<Mutex<SessionState>>,
    kind: CallKind,
    armed: bool,
}

impl PendingGuard {
    fn settle(mut self, session: &mut SessionState) {
        *self.kind.flag(session) = false;
        self.armed = false;
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if self.armed {
            let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
            *self.kind.flag(&mut session) = false;
        }
    }
}

struct CallRequest {
    first: String,
    second: String,
    guard: PendingGuard,
}

#[derive(Clone)]
pub struct WorkflowController {
    session: Arc<Mutex<SessionState>>,
    summarizer: Arc<dyn Summarizer>,
    mailer: Arc<dyn Mailer>,
    notifications: broadcast::Sender<Notification>,
}

impl WorkflowController {
    pub fn new(
        summarizer: Arc<dyn Summarizer>,
        mailer: Arc<dyn Mailer>,
        session: SessionState,
    ) -> Self {
        let (notifications, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        Self {
            session: Arc::new(Mutex::new(session)),
            summarizer,
            mailer,
            notifications,
        }
    }

    /// Receive every notification published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.session().clone()
    }

    pub fn controls(&self) -> Controls {
        self.session().controls()
    }

    pub fn view(&self) -> SummaryView {
        self.session().view()
    }

    pub fn set_transcript(&self, transcript: impl Into<String>) {
        self.session().transcript = transcript.into();
    }

    pub fn set_instruction_prompt(&self, prompt: impl Into<String>) {
        self.session().instruction_prompt = prompt.into();
    }

    pub fn set_recipient_email(&self, recipient: impl Into<String>) {
        self.session().recipient_email = recipient.into();
    }

    /// Replace the transcript with the contents of a user-selected file.
    pub fn load_transcript(
        &self,
        file_contents: impl Into<String>,
        declared_mime_type: &str,
    ) -> Notification {
        if !is_plain_text(declared_mime_type) {
            return self.publish(
                WorkflowError::UnsupportedFileType {
                    mime_type: declared_mime_type.to_string(),
                }
                .into(),
            );
        }

        let contents = file_contents.into();
        info!("Transcript loaded: {} chars", contents.len());
        self.session().transcript = contents;
        self.publish(Outcome::FileLoaded.into())
    }

    /// Ask the summarizer for a summary of the current transcript.
    pub async fn generate_summary(&self) -> Option<Notification> {
        let request = match self.begin(CallKind::Generation) {
            Ok(Some(request)) => request,
            Ok(None) => return None,
            Err(err) => return Some(self.publish(err.into())),
        };

        let CallRequest {
            first: transcript,
            second: instructions,
            guard,
        } = request;

        info!(
            "Generating summary for {} chars of transcript with {}",
            transcript.len(),
            self.summarizer.name()
        );
        let result = self.summarizer.generate(&transcript, &instructions).await;

        let notification = {
            let mut session = self.session();
            guard.settle(&mut session);
            match result {
                Ok(generated) => {
                    debug!("Generated summary: {}", generated.summary);
                    session.summary = generated.summary;
                    Notification::from(Outcome::SummaryGenerated)
                }
                Err(e) => Notification::from(WorkflowError::GenerationFailed {
                    reason: format!("{e:#}"),
                }),
            }
        };

        Some(self.publish(notification))
    }

    /// Flip between the rendered and the editable summary. Returns the new
    /// mode, or `None` when there is no summary to edit.
    pub fn toggle_edit(&self) -> Option<bool> {
        let mut session = self.session();
        if !session.has_summary() {
            debug!("Ignoring edit toggle without a summary");
            return None;
        }
        session.is_editing = !session.is_editing;
        Some(session.is_editing)
    }

    /// Replace the summary text. Only applies while in edit mode.
    pub fn edit_summary(&self, text: impl Into<String>) -> bool {
        let mut session = self.session();
        if !session.is_editing {
            return false;
        }
        session.summary = text.into();
        true
    }

    /// Deliver the current summary to the current recipient.
    pub async fn send_summary(&self) -> Option<Notification> {
        let request = match self.begin(CallKind::Delivery) {
            Ok(Some(request)) => request,
            Ok(None) => return None,
            Err(err) => return Some(self.publish(err.into())),
        };

        let CallRequest {
            first: recipient,
            second: summary,
            guard,
        } = request;

        info!("Sending summary to {} with {}", recipient, self.mailer.name());
        let result = self.mailer.send(&recipient, &summary).await;

        let notification = {
            let mut session = self.session();
            guard.settle(&mut session);
            match result {
                Ok(receipt) if receipt.simulated => {
                    let message = receipt.message.unwrap_or_else(|| {
                        "The delivery service accepted the summary but did not send it."
                            .to_string()
                    });
                    Notification::from(Outcome::EmailSimulated { message })
                }
                Ok(receipt) if receipt.delivered => {
                    Notification::from(Outcome::EmailSent { recipient })
                }
                Ok(_) => Notification::from(WorkflowError::SendFailed {
                    reason: "delivery service did not accept the message".to_string(),
                }),
                Err(e) => Notification::from(WorkflowError::SendFailed {
                    reason: format!("{e:#}"),
                }),
            }
        };

        Some(self.publish(notification))
    }

    /// Check preconditions and enter Pending. `Ok(None)` means a call of
    /// this kind is already in flight.
    fn begin(&self, kind: CallKind) -> Result<Option<CallRequest>, WorkflowError> {
        let mut session = self.session();

        let (first, second) = match kind {
            CallKind::Generation => {
                if session.transcript.trim().is_empty() {
                    return Err(WorkflowError::EmptyTranscript);
                }
                (session.transcript.clone(), session.instruction_prompt.clone())
            }
            CallKind::Delivery => {
                if session.recipient_email.trim().is_empty() || session.summary.trim().is_empty() {
                    return Err(WorkflowError::MissingSendFields);
                }
                (session.recipient_email.clone(), session.summary.clone())
            }
        };

        let flag = kind.flag(&mut session);
        if *flag {
            debug!("{:?} already in flight, ignoring request", kind);
            return Ok(None);
        }
        *flag = true;

        Ok(Some(CallRequest {
            first,
            second,
            guard: PendingGuard {
                session: Arc::clone(&self.session),
                kind,
                armed: true,
            },
        }))
    }

    fn publish(&self, notification: Notification) -> Notification {
        match notification.severity {
            Severity::Destructive => warn!(
                kind = notification.kind.as_str(),
                "{}: {}", notification.title, notification.description
            ),
            Severity::Neutral => info!(
                kind = notification.kind.as_str(),
                "{}: {}", notification.title, notification.description
            ),
        }

        // No subscribers is fine: the notification is also returned to the caller.
        let _ = self.notifications.send(notification.clone());
        notification
    }

    fn session(&self) -> MutexGuard<'_, SessionState> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborator::{DeliveryReceipt, GeneratedSummary};
    use crate::workflow::NotificationKind;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Holds a call in flight until released.
    #[derive(Default)]
    struct Gate {
        entered: Notify,
        release: Notify,
    }

    struct FakeSummarizer {
        calls: AtomicUsize,
        reply: Result<String, String>,
        gate: Option<Arc<Gate>>,
    }

    impl FakeSummarizer {
        fn replying(summary: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply: Ok(summary.to_string()),
                gate: None,
            })
        }

        fn failing(reason: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply: Err(reason.to_string()),
                gate: None,
            })
        }

        fn gated(summary: &str, gate: Arc<Gate>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply: Ok(summary.to_string()),
                gate: Some(gate),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Summarizer for FakeSummarizer {
        fn name(&self) -> &'static str {
            "fake summarizer"
        }

        async fn generate(&self, _transcript: &str, _instructions: &str) -> Result<GeneratedSummary> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.entered.notify_one();
                gate.release.notified().await;
            }
            match &self.reply {
                Ok(summary) => Ok(GeneratedSummary {
                    summary: summary.clone(),
                }),
                Err(reason) => Err(anyhow!("{}", reason)),
            }
        }
    }

    struct FakeMailer {
        calls: AtomicUsize,
        reply: Result<DeliveryReceipt, String>,
        gate: Option<Arc<Gate>>,
    }

    impl FakeMailer {
        fn replying(receipt: DeliveryReceipt) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply: Ok(receipt),
                gate: None,
            })
        }

        fn failing(reason: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply: Err(reason.to_string()),
                gate: None,
            })
        }

        fn gated(gate: Arc<Gate>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply: Ok(DeliveryReceipt::delivered()),
                gate: Some(gate),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Mailer for FakeMailer {
        fn name(&self) -> &'static str {
            "fake mailer"
        }

        async fn send(&self, _recipient: &str, _body: &str) -> Result<DeliveryReceipt> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.entered.notify_one();
                gate.release.notified().await;
            }
            self.reply.clone().map_err(|reason| anyhow!("{}", reason))
        }
    }

    fn controller(summarizer: Arc<FakeSummarizer>, mailer: Arc<FakeMailer>) -> WorkflowController {
        WorkflowController::new(
            summarizer,
            mailer,
            SessionState::new("Summarize the meeting", "team@example.com"),
        )
    }

    fn with_summary(summary: &str, mailer: Arc<FakeMailer>) -> WorkflowController {
        let c = controller(FakeSummarizer::replying(summary), mailer);
        {
            let mut session = c.session();
            session.summary = summary.to_string();
        }
        c
    }

    #[test]
    fn test_is_plain_text() {
        assert!(is_plain_text("text/plain"));
        assert!(is_plain_text("text/plain; charset=utf-8"));
        assert!(is_plain_text(" TEXT/PLAIN "));
        assert!(!is_plain_text("text/markdown"));
        assert!(!is_plain_text("image/png"));
        assert!(!is_plain_text(""));
    }

    #[test]
    fn test_load_plain_text_file() {
        let c = controller(
            FakeSummarizer::replying("x"),
            FakeMailer::replying(DeliveryReceipt::delivered()),
        );
        let n = c.load_transcript("Hello team", "text/plain");
        assert_eq!(n.kind, NotificationKind::FileLoaded);
        assert_eq!(c.snapshot().transcript, "Hello team");
    }

    #[test]
    fn test_load_unsupported_file_keeps_transcript() {
        let c = controller(
            FakeSummarizer::replying("x"),
            FakeMailer::replying(DeliveryReceipt::delivered()),
        );
        c.set_transcript("existing notes");
        let n = c.load_transcript("\u{89}PNG", "image/png");
        assert_eq!(n.kind, NotificationKind::UnsupportedFileType);
        assert!(n.is_destructive());
        assert_eq!(c.snapshot().transcript, "existing notes");
    }

    #[tokio::test]
    async fn test_generate_with_blank_transcript_makes_no_call() {
        let summarizer = FakeSummarizer::replying("x");
        let c = controller(
            summarizer.clone(),
            FakeMailer::replying(DeliveryReceipt::delivered()),
        );

        for transcript in ["", "   ", "\n\t\n"] {
            c.set_transcript(transcript);
            let n = c.generate_summary().await.unwrap();
            assert_eq!(n.kind, NotificationKind::EmptyTranscript);
        }

        assert_eq!(summarizer.calls(), 0);
        assert!(!c.snapshot().is_generating);
    }

    #[tokio::test]
    async fn test_generate_success_stores_summary() {
        let summarizer = FakeSummarizer::replying("**Decision**: proceed");
        let c = controller(
            summarizer.clone(),
            FakeMailer::replying(DeliveryReceipt::delivered()),
        );
        c.set_transcript("Agenda: X");

        let n = c.generate_summary().await.unwrap();
        assert_eq!(n.kind, NotificationKind::SummaryGenerated);

        let state = c.snapshot();
        assert_eq!(state.summary, "**Decision**: proceed");
        assert!(!state.is_generating);
        assert_eq!(summarizer.calls(), 1);

        match c.view() {
            SummaryView::Rendered(html) => {
                assert!(html.contains("<strong>Decision</strong>"))
            }
            other => panic!("expected rendered view, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_failure_keeps_previous_summary() {
        let c = controller(
            FakeSummarizer::failing("status 500"),
            FakeMailer::replying(DeliveryReceipt::delivered()),
        );
        c.set_transcript("Agenda: X");
        c.session().summary = "old summary".to_string();

        let n = c.generate_summary().await.unwrap();
        assert_eq!(n.kind, NotificationKind::GenerationFailed);

        let state = c.snapshot();
        assert_eq!(state.summary, "old summary");
        assert!(!state.is_generating);
    }

    #[tokio::test]
    async fn test_generate_is_not_reentrant() {
        let gate = Arc::new(Gate::default());
        let summarizer = FakeSummarizer::gated("done", gate.clone());
        let c = controller(
            summarizer.clone(),
            FakeMailer::replying(DeliveryReceipt::delivered()),
        );
        c.set_transcript("Agenda: X");

        let first = {
            let c = c.clone();
            tokio::spawn(async move { c.generate_summary().await })
        };

        gate.entered.notified().await;
        assert!(c.snapshot().is_generating);
        assert!(!c.controls().generate_enabled);

        assert!(c.generate_summary().await.is_none());
        assert_eq!(summarizer.calls(), 1);

        gate.release.notify_one();
        let n = first.await.unwrap().unwrap();
        assert_eq!(n.kind, NotificationKind::SummaryGenerated);
        assert!(!c.snapshot().is_generating);
        assert_eq!(summarizer.calls(), 1);
    }

    #[tokio::test]
    async fn test_send_allowed_while_generation_pending() {
        let gate = Arc::new(Gate::default());
        let mailer = FakeMailer::replying(DeliveryReceipt::delivered());
        let c = controller(FakeSummarizer::gated("new", gate.clone()), mailer.clone());
        c.set_transcript("Agenda: X");
        c.session().summary = "current".to_string();

        let pending = {
            let c = c.clone();
            tokio::spawn(async move { c.generate_summary().await })
        };
        gate.entered.notified().await;

        let n = c.send_summary().await.unwrap();
        assert_eq!(n.kind, NotificationKind::EmailSent);
        assert_eq!(mailer.calls(), 1);

        gate.release.notify_one();
        pending.await.unwrap();
        assert_eq!(c.snapshot().summary, "new");
    }

    #[tokio::test]
    async fn test_dropped_generation_clears_flag() {
        let gate = Arc::new(Gate::default());
        let c = controller(
            FakeSummarizer::gated("never", gate.clone()),
            FakeMailer::replying(DeliveryReceipt::delivered()),
        );
        c.set_transcript("Agenda: X");

        let pending = {
            let c = c.clone();
            tokio::spawn(async move { c.generate_summary().await })
        };
        gate.entered.notified().await;
        assert!(c.snapshot().is_generating);

        pending.abort();
        let _ = pending.await;
        assert!(!c.snapshot().is_generating);
    }

    #[tokio::test]
    async fn test_send_missing_fields_makes_no_call() {
        let mailer = FakeMailer::replying(DeliveryReceipt::delivered());

        let cases = [("", "summary"), ("  ", "summary"), ("a@example.com", ""), ("a@example.com", " \n ")];
        for (recipient, summary) in cases {
            let c = with_summary(summary, mailer.clone());
            c.set_recipient_email(recipient);
            let n = c.send_summary().await.unwrap();
            assert_eq!(n.kind, NotificationKind::MissingSendFields);
            assert!(!c.snapshot().is_sending);
        }

        assert_eq!(mailer.calls(), 0);
    }

    #[tokio::test]
    async fn test_send_delivered() {
        let mailer = FakeMailer::replying(DeliveryReceipt::delivered());
        let c = with_summary("notes", mailer.clone());
        c.set_recipient_email("ops@example.com");

        let n = c.send_summary().await.unwrap();
        assert_eq!(n.kind, NotificationKind::EmailSent);
        assert_eq!(n.description, "Meeting summary has been sent to ops@example.com");
        assert!(!c.snapshot().is_sending);
        assert_eq!(mailer.calls(), 1);
    }

    #[tokio::test]
    async fn test_send_simulated() {
        let c = with_summary(
            "notes",
            FakeMailer::replying(DeliveryReceipt::simulated("sandbox limit")),
        );

        let n = c.send_summary().await.unwrap();
        assert_eq!(n.kind, NotificationKind::EmailSimulated);
        assert_eq!(n.description, "sandbox limit");
        assert_eq!(n.severity, Severity::Neutral);
        assert!(!c.snapshot().is_sending);
    }

    #[tokio::test]
    async fn test_send_failure() {
        let c = with_summary("notes", FakeMailer::failing("connection refused"));

        let n = c.send_summary().await.unwrap();
        assert_eq!(n.kind, NotificationKind::SendFailed);
        assert!(n.is_destructive());
        assert!(!c.snapshot().is_sending);
    }

    #[tokio::test]
    async fn test_send_not_delivered_is_failure() {
        let receipt = DeliveryReceipt {
            delivered: false,
            simulated: false,
            message: None,
        };
        let c = with_summary("notes", FakeMailer::replying(receipt));

        let n = c.send_summary().await.unwrap();
        assert_eq!(n.kind, NotificationKind::SendFailed);
    }

    #[tokio::test]
    async fn test_send_is_not_reentrant() {
        let gate = Arc::new(Gate::default());
        let mailer = FakeMailer::gated(gate.clone());
        let c = with_summary("notes", mailer.clone());

        let first = {
            let c = c.clone();
            tokio::spawn(async move { c.send_summary().await })
        };
        gate.entered.notified().await;
        assert!(c.snapshot().is_sending);

        assert!(c.send_summary().await.is_none());

        gate.release.notify_one();
        first.await.unwrap();
        assert_eq!(mailer.calls(), 1);
        assert!(!c.snapshot().is_sending);
    }

    #[test]
    fn test_toggle_edit_requires_summary() {
        let c = controller(
            FakeSummarizer::replying("x"),
            FakeMailer::replying(DeliveryReceipt::delivered()),
        );
        assert_eq!(c.toggle_edit(), None);
        assert!(!c.snapshot().is_editing);
    }

    #[test]
    fn test_edits_are_live() {
        let c = with_summary("draft", FakeMailer::replying(DeliveryReceipt::delivered()));

        assert!(!c.edit_summary("ignored outside edit mode"));
        assert_eq!(c.snapshot().summary, "draft");

        assert_eq!(c.toggle_edit(), Some(true));
        assert_eq!(c.view(), SummaryView::Editing("draft".to_string()));
        assert!(c.edit_summary("# Final"));

        assert_eq!(c.toggle_edit(), Some(false));
        assert_eq!(c.snapshot().summary, "# Final");
        assert!(matches!(c.view(), SummaryView::Rendered(html) if html.starts_with("<h1")));
    }

    #[tokio::test]
    async fn test_notifications_broadcast() {
        let c = controller(
            FakeSummarizer::replying("x"),
            FakeMailer::replying(DeliveryReceipt::delivered()),
        );
        let mut rx = c.subscribe();

        c.load_transcript("notes", "text/plain");
        c.set_transcript("");
        c.generate_summary().await;

        assert_eq!(rx.recv().await.unwrap().kind, NotificationKind::FileLoaded);
        assert_eq!(rx.recv().await.unwrap().kind, NotificationKind::EmptyTranscript);
    }
}
