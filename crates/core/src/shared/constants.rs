pub const DEFAULT_BACKEND_URL: &str = "https://attendance-backend.azurewebsites.net";

/// Transport-level request timeout. No retry or backoff is layered on top.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
