use super::backend_error::BackendError;
use crate::attendance::domain::ledger::AttendanceRecord;

/// Domain interface for committing a finalized attendance ledger.
///
/// The whole ledger travels as one request; there is no partial submit.
pub trait AttendanceSink: Send {
    /// Returns the backend's confirmation message, if it sent one.
    fn submit(
        &self,
        group: &str,
        records: &[AttendanceRecord],
    ) -> Result<Option<String>, BackendError>;
}
