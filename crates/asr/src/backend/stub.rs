use async_trait::async_trait;
use audio::AudioBuffer;

use crate::backend::AsrBackend;
use crate::error::Result;
use crate::types::Transcription;

/// Transcript returned when no override is configured
pub const DEFAULT_TRANSCRIPT: &str =
    "This is a placeholder transcription. The configured speech model has not been wired up yet.";

/// Canned backend used until a real model is integrated
///
/// Deterministic by construction and never fails.
pub struct StubBackend {
    transcript: String,
}

impl StubBackend {
    pub fn new(transcript: Option<String>) -> Self {
        Self {
            transcript: transcript.unwrap_or_else(|| DEFAULT_TRANSCRIPT.to_string()),
        }
    }
}

#[async_trait]
impl AsrBackend for StubBackend {
    async fn transcribe(&self, buffer: &AudioBuffer, language: &str) -> Result<Transcription> {
        tracing::debug!(samples = buffer.len(), language, "stub transcription");

        Ok(Transcription {
            text: self.transcript.clone(),
            confidence: None,
        })
    }

    fn name(&self) -> &str {
        "stub"
    }
}
