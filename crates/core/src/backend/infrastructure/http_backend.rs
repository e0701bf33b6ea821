use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::attendance::domain::ledger::AttendanceRecord;
use crate::backend::domain::attendance_sink::AttendanceSink;
use crate::backend::domain::backend_error::BackendError;
use crate::backend::domain::face_recognizer::{FaceRecognizer, Recognition};
use crate::backend::domain::group_directory::GroupDirectory;
use crate::backend::domain::person_registrar::{PersonRegistrar, Registration};
use crate::shared::constants::DEFAULT_TIMEOUT_SECS;
use crate::shared::image_asset::ImageAsset;

// Per-endpoint fallback texts when the error body carries no message.
const FALLBACK_PROCESS: &str = "Failed to process the request.";
const FALLBACK_SUBMIT: &str = "Failed to submit attendance.";
const FALLBACK_REGISTER: &str = "Failed to register person.";

// --- Wire types ---

#[derive(Deserialize)]
struct SectionsResponse {
    #[serde(default)]
    sections: Vec<String>,
}

#[derive(Deserialize)]
struct RegisteredUsersResponse {
    #[serde(default)]
    registered_users: Vec<String>,
}

#[derive(Deserialize)]
struct RecognitionResponse {
    #[serde(default)]
    image_base64: Vec<String>,
    #[serde(default)]
    identified_names: Vec<String>,
}

#[derive(Serialize)]
struct AttendanceSubmission<'a> {
    section: &'a str,
    attendance: &'a [AttendanceRecord],
}

#[derive(Deserialize, Default)]
struct MessageResponse {
    message: Option<String>,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    message: Option<String>,
    detail: Option<String>,
}

/// Blocking HTTP adapter for the recognition backend.
///
/// Implements every backend-facing domain trait against one base URL.
/// Timeout policy lives here, at the transport layer; callers never retry.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Classify a non-2xx response, pulling the server's `message` or
    /// `detail` text out of the body when present. `fallback` is the
    /// endpoint-specific text used when neither field is there.
    fn check(response: Response, fallback: &str) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(BackendError::Api {
            status: status.as_u16(),
            message: extract_error_message(&body, fallback),
        })
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = self.url(path);
        log::debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        Self::check(response, FALLBACK_PROCESS)?
            .json()
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}

/// Best-effort pull of a human-readable message from an error body.
fn extract_error_message(body: &str, fallback: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .message
        .or(parsed.detail)
        .unwrap_or_else(|| fallback.to_string())
}

impl GroupDirectory for HttpBackend {
    fn groups(&self) -> Result<Vec<String>, BackendError> {
        let response: SectionsResponse = self.get_json("get_sections/")?;
        Ok(response.sections)
    }

    fn roster(&self, group: &str) -> Result<Vec<String>, BackendError> {
        let response: RegisteredUsersResponse =
            self.get_json(&format!("get_registered_users/{group}"))?;
        Ok(response.registered_users)
    }
}

impl FaceRecognizer for HttpBackend {
    fn detect_and_recognize(
        &self,
        image: &ImageAsset,
        group: &str,
    ) -> Result<Recognition, BackendError> {
        let url = self.url("detect_and_recognize/");
        log::debug!("POST {url} ({} bytes)", image.bytes().len());

        let form = Form::new()
            .part(
                "file",
                Part::bytes(image.bytes().to_vec()).file_name(image.file_name().to_string()),
            )
            .text("section", group.to_string());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let parsed: RecognitionResponse = Self::check(response, FALLBACK_PROCESS)?
            .json()
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        Ok(Recognition {
            rendered_images: parsed.image_base64,
            identified_names: parsed.identified_names,
        })
    }
}

impl AttendanceSink for HttpBackend {
    fn submit(
        &self,
        group: &str,
        records: &[AttendanceRecord],
    ) -> Result<Option<String>, BackendError> {
        let url = self.url("submit_attendance/");
        log::debug!("POST {url} ({} records)", records.len());

        let payload = AttendanceSubmission {
            section: group,
            attendance: records,
        };
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let parsed: MessageResponse = Self::check(response, FALLBACK_SUBMIT)?
            .json()
            .unwrap_or_default();
        Ok(parsed.message)
    }
}

impl PersonRegistrar for HttpBackend {
    fn register(&self, request: &Registration) -> Result<Option<String>, BackendError> {
        let url = self.url("register_person/");
        log::debug!("POST {url} (label={})", request.name);

        // Field names, including the capitalized `Contact`, are fixed by
        // the backend contract.
        let form = Form::new()
            .part(
                "file",
                Part::bytes(request.image.bytes().to_vec())
                    .file_name(request.image.file_name().to_string()),
            )
            .text("label", request.name.clone())
            .text("Contact", request.contact.clone())
            .text("section", request.group.clone());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let parsed: MessageResponse = Self::check(response, FALLBACK_REGISTER)?
            .json()
            .unwrap_or_default();
        Ok(parsed.message)
    }
}
