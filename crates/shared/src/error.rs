use thiserror::Error;

/// Fallback text when a transport failure carries no description of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while processing the video";
pub const UNKNOWN_REMOTE_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadErrorKind {
    Validation,
    Transport,
    Remote,
}

/// Every way a submission can end without a verdict. The `Display` output is
/// the exact message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Please select a video file")]
    NoFileSelected,
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Remote(String),
    #[error("Malformed response from prediction endpoint")]
    MalformedResponse,
}

impl UploadError {
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            UploadError::Transport(GENERIC_FAILURE_MESSAGE.to_string())
        } else {
            UploadError::Transport(message)
        }
    }

    /// Uses the payload's message when there is a non-blank one, else `fallback`.
    pub fn remote(message: Option<String>, fallback: impl FnOnce() -> String) -> Self {
        match message {
            Some(message) if !message.trim().is_empty() => UploadError::Remote(message),
            _ => UploadError::Remote(fallback()),
        }
    }

    pub fn status_message(status: u16) -> String {
        format!("HTTP error! status: {status}")
    }

    pub fn kind(&self) -> UploadErrorKind {
        match self {
            UploadError::NoFileSelected => UploadErrorKind::Validation,
            UploadError::Transport(_) => UploadErrorKind::Transport,
            UploadError::Remote(_) | UploadError::MalformedResponse => UploadErrorKind::Remote,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_prefers_payload_message() {
        let err = UploadError::remote(Some("model unavailable".into()), || {
            UploadError::status_message(500)
        });
        assert_eq!(err.message(), "model unavailable");
    }

    #[test]
    fn remote_falls_back_on_blank_or_missing_message() {
        let missing = UploadError::remote(None, || UploadError::status_message(502));
        assert_eq!(missing.message(), "HTTP error! status: 502");

        let blank = UploadError::remote(Some("  ".into()), || UNKNOWN_REMOTE_ERROR.to_string());
        assert_eq!(blank.message(), "Unknown error");
    }

    #[test]
    fn blank_transport_message_is_replaced() {
        assert_eq!(UploadError::transport("").message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(
            UploadError::transport("connection refused").message(),
            "connection refused"
        );
    }

    #[test]
    fn malformed_response_is_remote_class() {
        assert_eq!(
            UploadError::MalformedResponse.kind(),
            UploadErrorKind::Remote
        );
        assert_eq!(
            UploadError::NoFileSelected.kind(),
            UploadErrorKind::Validation
        );
    }
}
