use thiserror::Error;

/// Failures reaching or talking to the recognition backend.
///
/// The split matters for what the operator sees: transport failures get a
/// generic retry message, while backend rejections surface the server's
/// own text verbatim.
#[derive(Debug, Error)]
pub enum BackendError {
    /// No usable response arrived (connection refused, timeout, DNS).
    #[error("no response from server: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status and a message body.
    #[error("server error {status}: {message}")]
    Api { status: u16, message: String },

    /// A 2xx response whose body could not be parsed.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Operator-facing text for this failure.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Transport(_) => {
                "No response from server. Please try again later.".to_string()
            }
            BackendError::Api { message, .. } => message.clone(),
            BackendError::Decode(_) => "An unexpected error occurred.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_user_message_is_generic() {
        let err = BackendError::Transport("connection refused".to_string());
        assert_eq!(
            err.user_message(),
            "No response from server. Please try again later."
        );
    }

    #[test]
    fn test_api_user_message_is_verbatim() {
        let err = BackendError::Api {
            status: 422,
            message: "No face found in image 2.".to_string(),
        };
        assert_eq!(err.user_message(), "No face found in image 2.");
    }

    #[test]
    fn test_decode_user_message_is_generic() {
        let err = BackendError::Decode("expected value at line 1".to_string());
        assert_eq!(err.user_message(), "An unexpected error occurred.");
    }
}
