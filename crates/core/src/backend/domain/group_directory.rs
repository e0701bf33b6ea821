use super::backend_error::BackendError;

/// Domain interface for the backend's group and roster listings.
///
/// The roster is authoritative and may change between calls (new
/// registrations land there), so callers re-fetch rather than cache.
pub trait GroupDirectory: Send {
    /// All known group identifiers, in backend order.
    fn groups(&self) -> Result<Vec<String>, BackendError>;

    /// Enrolled person names for one group, in backend order.
    fn roster(&self, group: &str) -> Result<Vec<String>, BackendError>;
}
