use super::backend_error::BackendError;
use crate::shared::image_asset::ImageAsset;

/// The backend's answer for one submitted image.
///
/// Rendered images are opaque base64 payloads (annotated copies of the
/// input); the client concatenates them but never interprets the content.
#[derive(Debug, Clone, Default)]
pub struct Recognition {
    pub rendered_images: Vec<String>,
    pub identified_names: Vec<String>,
}

/// Domain interface for remote face detection and recognition.
///
/// The backend processes exactly one image per call; batch submission is
/// the caller's loop.
pub trait FaceRecognizer: Send {
    fn detect_and_recognize(
        &self,
        image: &ImageAsset,
        group: &str,
    ) -> Result<Recognition, BackendError>;
}
