use thiserror::Error;

use crate::attendance::domain::session::{AggregatedOutcome, SubmissionSession};
use crate::backend::domain::backend_error::BackendError;
use crate::backend::domain::face_recognizer::FaceRecognizer;
use crate::backend::domain::group_directory::GroupDirectory;
use crate::shared::image_asset::ImageAsset;

#[derive(Debug, Error)]
pub enum MarkAttendanceError {
    /// Rejected locally before any network call.
    #[error("{0}")]
    Validation(String),

    /// A per-image detect call failed; the whole batch is abandoned and
    /// results aggregated so far are discarded.
    #[error("detection failed: {0}")]
    Recognition(#[source] BackendError),

    /// Aggregation succeeded but the roster refresh did not, so no ledger
    /// could be derived.
    #[error("roster fetch failed: {0}")]
    Roster(#[source] BackendError),
}

impl MarkAttendanceError {
    /// Operator-facing text for this failure.
    pub fn user_message(&self) -> String {
        match self {
            MarkAttendanceError::Validation(msg) => msg.clone(),
            MarkAttendanceError::Recognition(e) | MarkAttendanceError::Roster(e) => {
                e.user_message()
            }
        }
    }
}

/// Orchestrates one submission cycle: validate, detect each image against
/// the backend one request at a time, refresh the roster, and reconcile
/// the two into a session snapshot.
///
/// Requests are issued sequentially in submission order — the backend
/// processes one image per call, and awaiting each before the next bounds
/// backend load while keeping the aggregated lists in submission order.
/// The first failure short-circuits the cycle; nothing partial escapes.
pub struct MarkAttendanceUseCase {
    recognizer: Box<dyn FaceRecognizer>,
    directory: Box<dyn GroupDirectory>,
    on_progress: Option<Box<dyn Fn(usize, usize) + Send>>,
}

impl MarkAttendanceUseCase {
    pub fn new(
        recognizer: Box<dyn FaceRecognizer>,
        directory: Box<dyn GroupDirectory>,
        on_progress: Option<Box<dyn Fn(usize, usize) + Send>>,
    ) -> Self {
        Self {
            recognizer,
            directory,
            on_progress,
        }
    }

    pub fn execute(
        &self,
        images: &[ImageAsset],
        group: &str,
    ) -> Result<SubmissionSession, MarkAttendanceError> {
        if images.is_empty() || group.trim().is_empty() {
            return Err(MarkAttendanceError::Validation(
                "Please provide all required inputs.".to_string(),
            ));
        }

        let total = images.len();
        let mut outcome = AggregatedOutcome::new();
        for (i, image) in images.iter().enumerate() {
            if let Some(ref progress) = self.on_progress {
                progress(i + 1, total);
            }
            let recognition = self
                .recognizer
                .detect_and_recognize(image, group)
                .map_err(MarkAttendanceError::Recognition)?;
            outcome.absorb(recognition.rendered_images, recognition.identified_names);
        }
        log::info!(
            "Batch of {total} image(s) aggregated: {} rendered, {} identification(s)",
            outcome.rendered_images().len(),
            outcome.identified_names().len()
        );

        // Roster must be fetched after the batch so the ledger reflects any
        // registrations made since the previous cycle.
        let roster = self
            .directory
            .roster(group)
            .map_err(MarkAttendanceError::Roster)?;

        Ok(SubmissionSession::derive(
            group.to_string(),
            outcome,
            roster,
        ))
    }
}
