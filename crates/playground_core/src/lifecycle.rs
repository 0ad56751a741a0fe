//! Per-submission fetch state machine.
//!
//! ```text
//!            Created              ResponseReceived
//!   Idle ─────────────▶ Loading ───────────────────▶ Success
//!                        │  ▲                            │
//!         ResponseFailed │  │ RetryRequested             │
//!                        ▼  │                            │
//!                      Failure ◀─────────────────────────┘ (RetryRequested → Loading)
//! ```
//!
//! Every transition into `Loading` opens a new attempt with a fresh
//! [`AttemptId`]. Responses carry the id of the attempt that issued them and
//! are dropped unless it is still the current one.

use crate::recipe::ExtractionResponse;

/// Sequence number of a fetch attempt, starting at 1 for the first request.
pub type AttemptId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    /// The submission was just added to the collection.
    Created,
    /// User asked to run the extraction again.
    RetryRequested,
    ResponseReceived {
        attempt: AttemptId,
        response: ExtractionResponse,
    },
    ResponseFailed {
        attempt: AttemptId,
        message: String,
    },
}

/// Work the owner of a lifecycle must carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleCommand {
    /// Send one extraction request tagged with `attempt`.
    IssueRequest { attempt: AttemptId },
    /// Propagate the server-reported title to the collection.
    ReportTitle(String),
    /// Tell the user the attempt failed.
    SurfaceError(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchLifecycle {
    status: FetchStatus,
    attempt: AttemptId,
    result: Option<ExtractionResponse>,
    error_message: Option<String>,
}

impl FetchLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    /// Id of the live attempt, or 0 if no request was ever issued.
    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    pub fn result(&self) -> Option<&ExtractionResponse> {
        self.result.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn apply(&mut self, event: LifecycleEvent) -> Option<LifecycleCommand> {
        match event {
            LifecycleEvent::Created => {
                let untouched = self.status == FetchStatus::Idle
                    && self.result.is_none()
                    && self.error_message.is_none();
                untouched.then(|| self.begin_attempt())
            }
            LifecycleEvent::RetryRequested => match self.status {
                FetchStatus::Idle => None,
                FetchStatus::Loading | FetchStatus::Success | FetchStatus::Failure => {
                    Some(self.begin_attempt())
                }
            },
            LifecycleEvent::ResponseReceived { attempt, response } => {
                if !self.is_current(attempt) {
                    return None;
                }
                let title = response.recipe.title.clone();
                self.status = FetchStatus::Success;
                self.result = Some(response);
                self.error_message = None;
                Some(LifecycleCommand::ReportTitle(title))
            }
            LifecycleEvent::ResponseFailed { attempt, message } => {
                if !self.is_current(attempt) {
                    return None;
                }
                self.status = FetchStatus::Failure;
                self.result = None;
                self.error_message = Some(message.clone());
                Some(LifecycleCommand::SurfaceError(message))
            }
        }
    }

    fn begin_attempt(&mut self) -> LifecycleCommand {
        self.attempt += 1;
        self.status = FetchStatus::Loading;
        self.result = None;
        self.error_message = None;
        LifecycleCommand::IssueRequest {
            attempt: self.attempt,
        }
    }

    /// Whether a response tagged with `attempt` would still be applied.
    pub fn is_current(&self, attempt: AttemptId) -> bool {
        self.status == FetchStatus::Loading && attempt == self.attempt
    }
}
