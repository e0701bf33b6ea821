use thiserror::Error;

use crate::backend::domain::backend_error::BackendError;
use crate::backend::domain::person_registrar::{PersonRegistrar, Registration};

#[derive(Debug, Error)]
pub enum RegisterError {
    /// Rejected locally; nothing was sent.
    #[error("{0}")]
    Validation(String),

    #[error("registration failed: {0}")]
    Backend(#[from] BackendError),
}

impl RegisterError {
    pub fn user_message(&self) -> String {
        match self {
            RegisterError::Validation(msg) => msg.clone(),
            RegisterError::Backend(e) => e.user_message(),
        }
    }
}

/// Enrolls one person under a group after local input validation.
pub struct RegisterPersonUseCase {
    registrar: Box<dyn PersonRegistrar>,
}

impl RegisterPersonUseCase {
    pub fn new(registrar: Box<dyn PersonRegistrar>) -> Self {
        Self { registrar }
    }

    pub fn execute(&self, request: &Registration) -> Result<Option<String>, RegisterError> {
        validate(request).map_err(RegisterError::Validation)?;
        let message = self.registrar.register(request)?;
        log::info!(
            "Registered {} under group {}",
            request.name,
            request.group
        );
        Ok(message)
    }
}

fn validate(request: &Registration) -> Result<(), String> {
    if request.image.is_empty() {
        return Err("Please upload an image.".to_string());
    }
    if request.name.trim().is_empty() {
        return Err("Name is required.".to_string());
    }
    if !is_valid_contact(request.contact.trim()) {
        return Err(
            "Please enter a valid 10-digit mobile number starting with 6, 7, 8, or 9."
                .to_string(),
        );
    }
    if request.group.trim().is_empty() {
        return Err("Section is required.".to_string());
    }
    Ok(())
}

/// 10-digit mobile number starting with 6-9.
fn is_valid_contact(contact: &str) -> bool {
    contact.len() == 10
        && contact.starts_with(['6', '7', '8', '9'])
        && contact.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::image_asset::ImageAsset;
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct StubRegistrar {
        calls: Arc<Mutex<usize>>,
    }

    impl PersonRegistrar for StubRegistrar {
        fn register(&self, _request: &Registration) -> Result<Option<String>, BackendError> {
            *self.calls.lock().unwrap() += 1;
            Ok(Some("Person registered successfully!".to_string()))
        }
    }

    fn request() -> Registration {
        Registration {
            image: ImageAsset::new("face.jpg", vec![1, 2, 3]),
            name: "Alice".to_string(),
            contact: "9876543210".to_string(),
            group: "CS-A".to_string(),
        }
    }

    #[rstest]
    #[case::valid("9876543210", true)]
    #[case::starts_with_6("6000000000", true)]
    #[case::starts_with_5("5876543210", false)]
    #[case::too_short("987654321", false)]
    #[case::too_long("98765432100", false)]
    #[case::non_digit("98765A3210", false)]
    #[case::empty("", false)]
    fn test_contact_validation(#[case] contact: &str, #[case] valid: bool) {
        assert_eq!(is_valid_contact(contact), valid);
    }

    #[test]
    fn test_valid_request_registers() {
        let registrar = StubRegistrar::default();
        let calls = registrar.calls.clone();
        let uc = RegisterPersonUseCase::new(Box::new(registrar));

        let message = uc.execute(&request()).unwrap();

        assert_eq!(message.as_deref(), Some("Person registered successfully!"));
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_invalid_contact_never_reaches_registrar() {
        let registrar = StubRegistrar::default();
        let calls = registrar.calls.clone();
        let uc = RegisterPersonUseCase::new(Box::new(registrar));

        let mut bad = request();
        bad.contact = "12345".to_string();
        let err = uc.execute(&bad).unwrap_err();

        assert!(matches!(err, RegisterError::Validation(_)));
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_blank_name_rejected() {
        let uc = RegisterPersonUseCase::new(Box::new(StubRegistrar::default()));
        let mut bad = request();
        bad.name = "  ".to_string();
        let err = uc.execute(&bad).unwrap_err();
        assert_eq!(err.user_message(), "Name is required.");
    }

    #[test]
    fn test_empty_image_rejected() {
        let uc = RegisterPersonUseCase::new(Box::new(StubRegistrar::default()));
        let mut bad = request();
        bad.image = ImageAsset::new("face.jpg", Vec::new());
        let err = uc.execute(&bad).unwrap_err();
        assert_eq!(err.user_message(), "Please upload an image.");
    }

    #[test]
    fn test_blank_group_rejected() {
        let uc = RegisterPersonUseCase::new(Box::new(StubRegistrar::default()));
        let mut bad = request();
        bad.group = String::new();
        let err = uc.execute(&bad).unwrap_err();
        assert_eq!(err.user_message(), "Section is required.");
    }
}
