use aural_core::HttpError;
use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AsrError>;

/// Transcription stage errors
#[derive(Debug, Error)]
pub enum AsrError {
    /// The backend's model invocation failed
    #[error("inference error: {0}")]
    Inference(String),

    /// The backend produced no text; surfaced instead of an empty transcript
    #[error("backend returned an empty transcription")]
    EmptyTranscription,
}

impl HttpError for AsrError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn reason(&self) -> &'static str {
        "internal-error"
    }

    fn client_message(&self) -> String {
        "internal server error".to_string()
    }
}
