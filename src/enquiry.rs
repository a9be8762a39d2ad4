//! The enquiry dialog.
//!
//! A visitor fills in an [`Enquiry`] and submits it. Submission runs on a
//! Tokio task so the caller stays responsive:
//!
//! ```text
//! Editing ──submit──▶ Submitting ──ok──▶ Submitted ──(confirmation delay)──▶ Closed
//!                         │
//!                         └──err──▶ Failed(message)
//! ```
//!
//! The [`EnquiryIntake`] collaborator decides what "sending" means. The only
//! implementation shipped, [`SimulatedIntake`], waits a moment and logs the
//! enquiry; nothing is stored or transmitted.
//!
//! Closing the dialog mid-flight goes through [`SubmissionHandle::cancel`],
//! which stops the intake call or the pending confirmation, whichever is
//! running. The close callback never runs after a cancel.

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

#[derive(Error, Debug)]
pub enum EnquiryError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("this enquiry has already been submitted")]
    AlreadySubmitted,
    #[error("enquiry could not be sent: {0}")]
    Intake(String),
    #[error("enquiry cancelled")]
    Cancelled,
    #[error("enquiry task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Wedding,
    Portrait,
    Event,
    Commercial,
    Other,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::Wedding,
        EventType::Portrait,
        EventType::Event,
        EventType::Commercial,
        EventType::Other,
    ];

    /// Form value.
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Wedding => "wedding",
            EventType::Portrait => "portrait",
            EventType::Event => "event",
            EventType::Commercial => "commercial",
            EventType::Other => "other",
        }
    }

    /// Option label shown to visitors.
    pub fn label(self) -> &'static str {
        match self {
            EventType::Wedding => "Wedding",
            EventType::Portrait => "Portrait",
            EventType::Event => "Event",
            EventType::Commercial => "Commercial",
            EventType::Other => "Other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| {
                format!("unknown event type '{s}' (expected wedding, portrait, event, commercial or other)")
            })
    }
}

/// What a visitor typed into the dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_type: Option<EventType>,
    /// Free-form, as entered. Not parsed.
    pub event_date: String,
    pub message: String,
}

impl Enquiry {
    /// Required fields that are blank. Only presence is checked.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push("name");
        }
        if self.email.is_empty() {
            missing.push("email");
        }
        missing
    }
}

/// Receives submitted enquiries.
#[async_trait]
pub trait EnquiryIntake: Send + Sync {
    async fn submit(&self, enquiry: &Enquiry) -> Result<(), EnquiryError>;
}

/// Pretends to send: waits `delay`, logs, keeps nothing.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedIntake {
    delay: Duration,
}

impl SimulatedIntake {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedIntake {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

#[async_trait]
impl EnquiryIntake for SimulatedIntake {
    async fn submit(&self, enquiry: &Enquiry) -> Result<(), EnquiryError> {
        tokio::time::sleep(self.delay).await;
        tracing::info!(
            name = %enquiry.name,
            email = %enquiry.email,
            phone = %enquiry.phone,
            event_type = ?enquiry.event_type,
            event_date = %enquiry.event_date,
            message = %enquiry.message,
            "enquiry received"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    Editing,
    Submitting,
    Submitted,
    Failed(String),
    Closed,
}

pub struct EnquiryDialog {
    enquiry: Enquiry,
    confirmation_delay: Duration,
    state: Arc<watch::Sender<DialogState>>,
}

impl EnquiryDialog {
    /// An empty dialog that closes `confirmation_delay` after a successful
    /// submission.
    pub fn new(confirmation_delay: Duration) -> Self {
        let (state, _) = watch::channel(DialogState::Editing);
        Self {
            enquiry: Enquiry::default(),
            confirmation_delay,
            state: Arc::new(state),
        }
    }

    pub fn with_enquiry(mut self, enquiry: Enquiry) -> Self {
        self.enquiry = enquiry;
        self
    }

    pub fn enquiry(&self) -> &Enquiry {
        &self.enquiry
    }

    pub fn enquiry_mut(&mut self) -> &mut Enquiry {
        &mut self.enquiry
    }

    pub fn state(&self) -> DialogState {
        self.state.borrow().clone()
    }

    /// Observe state transitions. Rapid transitions may be coalesced.
    pub fn watch(&self) -> watch::Receiver<DialogState> {
        self.state.subscribe()
    }

    /// Validate and start submitting.
    ///
    /// Must be called from within a Tokio runtime. `on_close` runs once the
    /// confirmation has been shown for the configured delay, and never if
    /// the submission fails or is cancelled.
    pub fn submit<F>(
        &self,
        intake: Arc<dyn EnquiryIntake>,
        on_close: F,
    ) -> Result<SubmissionHandle, EnquiryError>
    where
        F: FnOnce() + Send + 'static,
    {
        match *self.state.borrow() {
            DialogState::Editing | DialogState::Failed(_) => {}
            _ => return Err(EnquiryError::AlreadySubmitted),
        }
        let missing = self.enquiry.missing_fields();
        if !missing.is_empty() {
            return Err(EnquiryError::MissingFields(missing));
        }

        self.state.send_replace(DialogState::Submitting);
        tracing::debug!(email = %self.enquiry.email, "submitting enquiry");

        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let state = Arc::clone(&self.state);
        let flow = run_submission(
            intake,
            self.enquiry.clone(),
            Arc::clone(&self.state),
            self.confirmation_delay,
            on_close,
        );
        let task = tokio::spawn(async move {
            tokio::select! {
                biased;
                Ok(()) = cancel_rx => {
                    state.send_replace(DialogState::Closed);
                    tracing::debug!("enquiry cancelled");
                    Err(EnquiryError::Cancelled)
                }
                outcome = flow => outcome,
            }
        });

        Ok(SubmissionHandle {
            cancel: Some(cancel_tx),
            task,
        })
    }
}

async fn run_submission<F>(
    intake: Arc<dyn EnquiryIntake>,
    enquiry: Enquiry,
    state: Arc<watch::Sender<DialogState>>,
    confirmation_delay: Duration,
    on_close: F,
) -> Result<(), EnquiryError>
where
    F: FnOnce() + Send + 'static,
{
    if let Err(err) = intake.submit(&enquiry).await {
        tracing::warn!(error = %err, "enquiry submission failed");
        state.send_replace(DialogState::Failed(err.to_string()));
        return Err(err);
    }
    state.send_replace(DialogState::Submitted);

    tokio::time::sleep(confirmation_delay).await;
    state.send_replace(DialogState::Closed);
    on_close();
    Ok(())
}

/// A running submission.
///
/// Dropping the handle lets the submission finish on its own.
pub struct SubmissionHandle {
    cancel: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<(), EnquiryError>>,
}

impl SubmissionHandle {
    /// Close the dialog. No-op once the submission has finished.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the submission to end.
    pub async fn join(self) -> Result<(), EnquiryError> {
        self.task
            .await
            .map_err(|e| EnquiryError::Task(e.to_string()))?
    }
}
