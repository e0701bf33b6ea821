use thiserror::Error;

use crate::attendance::domain::session::SubmissionSession;
use crate::backend::domain::attendance_sink::AttendanceSink;
use crate::backend::domain::backend_error::BackendError;

#[derive(Debug, Error)]
pub enum CommitError {
    /// Rejected locally; nothing was sent.
    #[error("{0}")]
    Validation(String),

    #[error("submit failed: {0}")]
    Backend(#[from] BackendError),
}

impl CommitError {
    pub fn user_message(&self) -> String {
        match self {
            CommitError::Validation(msg) => msg.clone(),
            CommitError::Backend(e) => e.user_message(),
        }
    }
}

/// Outcome of a successful commit. Confirmation text always names the
/// group the ledger was submitted for.
#[derive(Debug, Clone)]
pub struct CommitReceipt {
    pub group: String,
    pub message: Option<String>,
}

impl CommitReceipt {
    /// Always names the submitted group; any server message is appended
    /// rather than replacing the template.
    pub fn confirmation(&self) -> String {
        let confirmed = format!(
            "Attendance has been successfully submitted for section {}.",
            self.group
        );
        match &self.message {
            Some(msg) => format!("{confirmed} {msg}"),
            None => confirmed,
        }
    }
}

/// Transmits the finalized ledger as one atomic request.
///
/// Takes the session by reference: a failed commit leaves the caller's
/// snapshot (and its edits) intact for an explicit retry. No automatic
/// retry happens here.
pub struct CommitAttendanceUseCase {
    sink: Box<dyn AttendanceSink>,
}

impl CommitAttendanceUseCase {
    pub fn new(sink: Box<dyn AttendanceSink>) -> Self {
        Self { sink }
    }

    pub fn execute(&self, session: &SubmissionSession) -> Result<CommitReceipt, CommitError> {
        if session.ledger().is_empty() {
            return Err(CommitError::Validation(
                "Nothing to submit: the roster for this group is empty.".to_string(),
            ));
        }

        let message = self
            .sink
            .submit(session.group(), session.ledger().records())?;
        log::info!(
            "Committed {} record(s) for group {}",
            session.ledger().len(),
            session.group()
        );

        Ok(CommitReceipt {
            group: session.group().to_string(),
            message,
        })
    }
}
