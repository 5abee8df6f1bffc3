use std::path::Path;

use aural_core::HttpError;
use http::StatusCode;
use thiserror::Error;

use crate::buffer::AudioBuffer;

/// Accepted clip duration window in seconds, both ends inclusive
#[derive(Debug, Clone, Copy)]
pub struct DurationLimits {
    pub min_seconds: f64,
    pub max_seconds: f64,
}

impl Default for DurationLimits {
    fn default() -> Self {
        Self {
            min_seconds: 5.0,
            max_seconds: 10.0,
        }
    }
}

/// Why an upload was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Filename or content type does not indicate WAV
    #[error("only WAV uploads are supported")]
    WrongFormat,

    /// Decoded rate differs from the required rate (resampling disabled)
    #[error("sample rate {got} Hz does not match the required {want} Hz")]
    WrongSampleRate { got: u32, want: u32 },

    #[error("clip duration {seconds:.2}s is below the {min:.1}s minimum")]
    DurationTooShort { seconds: f64, min: f64 },

    #[error("clip duration {seconds:.2}s exceeds the {max:.1}s maximum")]
    DurationTooLong { seconds: f64, max: f64 },
}

impl HttpError for ValidationError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn reason(&self) -> &'static str {
        match self {
            Self::WrongFormat => "wrong-format",
            Self::WrongSampleRate { .. } => "wrong-sample-rate",
            Self::DurationTooShort { .. } => "duration-too-short",
            Self::DurationTooLong { .. } => "duration-too-long",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

/// Content types accepted for WAV uploads
///
/// Browsers and CLI clients disagree on the WAV MIME type, and several
/// send a generic one, so the filename extension is the primary signal.
const WAV_CONTENT_TYPES: &[&str] = &["audio/wav", "audio/wave", "audio/x-wav", "application/octet-stream", ""];

/// Check that an upload claims to be WAV before touching its bytes
pub fn validate_format(filename: &str, content_type: &str) -> Result<(), ValidationError> {
    let named_wav = Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));

    if named_wav && WAV_CONTENT_TYPES.contains(&content_type) {
        Ok(())
    } else {
        Err(ValidationError::WrongFormat)
    }
}

/// Validate a decoded buffer against the target rate and duration window
pub fn validate_buffer(buffer: &AudioBuffer, target_rate: u32, limits: DurationLimits) -> Result<(), ValidationError> {
    if buffer.sample_rate() != target_rate {
        return Err(ValidationError::WrongSampleRate {
            got: buffer.sample_rate(),
            want: target_rate,
        });
    }

    let seconds = buffer.duration_seconds();
    if seconds < limits.min_seconds {
        return Err(ValidationError::DurationTooShort {
            seconds,
            min: limits.min_seconds,
        });
    }
    if seconds > limits.max_seconds {
        return Err(ValidationError::DurationTooLong {
            seconds,
            max: limits.max_seconds,
        });
    }

    Ok(())
}

/// Apply every validation rule in order, first failure wins
///
/// Pure function of its inputs: format, then sample rate, then duration.
pub fn validate(
    filename: &str,
    content_type: &str,
    buffer: &AudioBuffer,
    target_rate: u32,
    limits: DurationLimits,
) -> Result<(), ValidationError> {
    validate_format(filename, content_type)?;
    validate_buffer(buffer, target_rate, limits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_of(seconds: f64, rate: u32) -> AudioBuffer {
        let count = (seconds * f64::from(rate)).round() as usize;
        AudioBuffer::new(vec![0.1; count], rate).unwrap()
    }

    #[test]
    fn wav_filename_and_content_type_accepted() {
        assert!(validate_format("clip.wav", "audio/wav").is_ok());
        assert!(validate_format("clip.WAV", "audio/x-wav").is_ok());
        assert!(validate_format("clip.wav", "application/octet-stream").is_ok());
        assert!(validate_format("clip.wav", "").is_ok());
    }

    #[test]
    fn non_wav_rejected_without_touching_content() {
        assert_eq!(validate_format("clip.mp3", "audio/mpeg"), Err(ValidationError::WrongFormat));
        assert_eq!(validate_format("clip", "audio/wav"), Err(ValidationError::WrongFormat));
        assert_eq!(validate_format("clip.wav", "text/plain"), Err(ValidationError::WrongFormat));
    }

    #[test]
    fn in_window_durations_are_valid() {
        let limits = DurationLimits::default();
        for seconds in [5.0, 5.01, 7.5, 9.99, 10.0] {
            let buffer = buffer_of(seconds, 16_000);
            assert!(
                validate_buffer(&buffer, 16_000, limits).is_ok(),
                "{seconds}s should validate"
            );
        }
    }

    #[test]
    fn short_clip_gets_too_short_never_too_long() {
        let buffer = buffer_of(3.0, 16_000);
        let err = validate_buffer(&buffer, 16_000, DurationLimits::default()).unwrap_err();
        assert!(matches!(err, ValidationError::DurationTooShort { .. }));
        assert_eq!(err.reason(), "duration-too-short");
    }

    #[test]
    fn long_clip_gets_too_long_never_too_short() {
        let buffer = buffer_of(12.0, 16_000);
        let err = validate_buffer(&buffer, 16_000, DurationLimits::default()).unwrap_err();
        assert!(matches!(err, ValidationError::DurationTooLong { .. }));
        assert_eq!(err.reason(), "duration-too-long");
    }

    #[test]
    fn mismatched_rate_rejected_before_duration() {
        // 5s at 8kHz: wrong rate and would also be in-window at its own rate
        let buffer = buffer_of(5.0, 8_000);
        let err = validate_buffer(&buffer, 16_000, DurationLimits::default()).unwrap_err();
        assert_eq!(err.reason(), "wrong-sample-rate");
    }

    #[test]
    fn format_rule_wins_over_everything() {
        let buffer = buffer_of(3.0, 8_000);
        let err = validate("clip.ogg", "audio/ogg", &buffer, 16_000, DurationLimits::default()).unwrap_err();
        assert_eq!(err, ValidationError::WrongFormat);
    }

    #[test]
    fn reasons_are_stable() {
        assert_eq!(ValidationError::WrongFormat.reason(), "wrong-format");
        assert_eq!(
            ValidationError::WrongSampleRate { got: 8_000, want: 16_000 }.reason(),
            "wrong-sample-rate"
        );
    }
}
