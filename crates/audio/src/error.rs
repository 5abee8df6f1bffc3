use aural_core::HttpError;
use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AudioError>;

/// Audio pipeline errors outside of validation
#[derive(Debug, Error)]
pub enum AudioError {
    /// Malformed or unsupported WAV payload
    #[error("decode error: {0}")]
    Decode(String),

    /// Resampler construction or processing failure
    #[error("resample error: {0}")]
    Resample(String),

    /// Feature computation failure
    #[error("feature extraction error: {0}")]
    Extraction(String),
}

impl HttpError for AudioError {
    fn status_code(&self) -> StatusCode {
        match self {
            // A payload we cannot decode is the client's problem; the rest is ours
            Self::Decode(_) => StatusCode::BAD_REQUEST,
            Self::Resample(_) | Self::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode-error",
            Self::Resample(_) | Self::Extraction(_) => "internal-error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Decode(_) => self.to_string(),
            Self::Resample(_) | Self::Extraction(_) => "internal server error".to_string(),
        }
    }
}
