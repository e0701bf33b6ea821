use super::backend_error::BackendError;
use crate::shared::image_asset::ImageAsset;

/// Enrollment request: one face photo plus the person's details.
#[derive(Debug, Clone)]
pub struct Registration {
    pub image: ImageAsset,
    pub name: String,
    pub contact: String,
    pub group: String,
}

/// Domain interface for enrolling a person under a group.
///
/// A freshly registered person appears in subsequent roster fetches.
pub trait PersonRegistrar: Send {
    /// Returns the backend's confirmation message, if it sent one.
    fn register(&self, request: &Registration) -> Result<Option<String>, BackendError>;
}
