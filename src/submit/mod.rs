//! Submission of a completed survey.
//!
//! A submission is split in two halves so a front end can keep drawing while
//! the request is out: [`Wizard::begin_submission`] validates, captures and
//! claims the trigger; [`Wizard::finish_submission`] applies the reply and
//! releases it. [`submit`] runs both halves back to back.

mod payload;
mod transport;
mod trigger;

pub use payload::{PayloadResponses, RatingsBody, SubmissionPayload, SubmitResponse};
pub use transport::{HttpTransport, SubmissionTransport, TransportError};
pub use trigger::{BusyGuard, SubmitTrigger, BUSY_LABEL, SUBMIT_LABEL};

use crate::survey::Wizard;

pub const SUCCESS_NOTICE: &str = "Form submitted successfully!";

/// How a submission attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Current page failed validation; errors are shown inline
    Blocked,
    /// Another submission is still in flight
    AlreadyInFlight,
    /// Server accepted the answers; the form has been reset
    Accepted {
        submission_id: Option<i64>,
        message: Option<String>,
    },
    /// Server answered `success: false`
    Rejected { error: String },
    /// Request failed or the reply could not be read
    Failed { message: String },
}

impl SubmitOutcome {
    /// Text for the alert shown to the user, if this outcome warrants one
    pub fn notice(&self) -> Option<String> {
        match self {
            SubmitOutcome::Blocked | SubmitOutcome::AlreadyInFlight => None,
            SubmitOutcome::Accepted { .. } => Some(SUCCESS_NOTICE.to_string()),
            SubmitOutcome::Rejected { error } => Some(format!("Error: {}", error)),
            SubmitOutcome::Failed { message } => Some(format!("Submission failed: {}", message)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted { .. })
    }
}

/// A validated payload together with the claim on the trigger
#[derive(Debug)]
pub struct PendingSubmission {
    payload: SubmissionPayload,
    guard: BusyGuard,
}

impl PendingSubmission {
    pub(crate) fn new(payload: SubmissionPayload, guard: BusyGuard) -> Self {
        Self { payload, guard }
    }

    pub fn into_parts(self) -> (SubmissionPayload, BusyGuard) {
        (self.payload, self.guard)
    }
}

/// Validate, send and apply the reply in one go
pub async fn submit(wizard: &mut Wizard, transport: &dyn SubmissionTransport) -> SubmitOutcome {
    let pending = match wizard.begin_submission() {
        Ok(pending) => pending,
        Err(outcome) => return outcome,
    };
    let (payload, guard) = pending.into_parts();

    tracing::info!(endpoint = transport.endpoint(), "submitting survey");
    let result = transport.submit(&payload).await;
    wizard.finish_submission(guard, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_texts() {
        let accepted = SubmitOutcome::Accepted {
            submission_id: Some(1),
            message: None,
        };
        assert_eq!(
            accepted.notice().as_deref(),
            Some("Form submitted successfully!")
        );
        assert!(accepted.is_success());

        let rejected = SubmitOutcome::Rejected {
            error: "duplicate".to_string(),
        };
        assert_eq!(rejected.notice().as_deref(), Some("Error: duplicate"));

        let failed = SubmitOutcome::Failed {
            message: "connection refused".to_string(),
        };
        assert_eq!(
            failed.notice().as_deref(),
            Some("Submission failed: connection refused")
        );

        assert!(SubmitOutcome::Blocked.notice().is_none());
        assert!(SubmitOutcome::AlreadyInFlight.notice().is_none());
    }
}
