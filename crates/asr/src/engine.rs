use audio::AudioBuffer;
use aural_config::AsrEngineType;

use crate::backend::{AsrBackend, stub::StubBackend};
use crate::error::AsrError;
use crate::types::Transcription;

/// Transcription engine holding the configured backend
///
/// One engine is built at startup and shared across requests; request
/// handling only reads it.
pub struct Engine {
    backend: Box<dyn AsrBackend>,
    language: String,
}

impl Engine {
    /// Transcribe a validated buffer with the configured backend
    ///
    /// An empty backend result is an error, never an empty transcript.
    pub async fn transcribe(&self, buffer: &AudioBuffer) -> crate::error::Result<Transcription> {
        tracing::debug!(backend = self.backend.name(), language = %self.language, "transcribing");

        let transcription = self.backend.transcribe(buffer, &self.language).await?;

        if transcription.text.trim().is_empty() {
            return Err(AsrError::EmptyTranscription);
        }

        Ok(transcription)
    }

    /// Name of the active backend
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Language hint the engine was configured with
    pub fn language(&self) -> &str {
        &self.language
    }
}

/// Builder for constructing the engine from configuration
pub struct EngineBuilder<'a> {
    config: &'a aural_config::Config,
}

impl<'a> EngineBuilder<'a> {
    pub fn new(config: &'a aural_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Engine> {
        let backend: Box<dyn AsrBackend> = match self.config.asr.engine {
            AsrEngineType::Stub => Box::new(StubBackend::new(self.config.asr.placeholder.clone())),
        };

        tracing::debug!("ASR engine initialized with backend: {}", backend.name());

        Ok(Engine {
            backend,
            language: self.config.asr.language.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use aural_config::Config;

    use super::*;
    use crate::backend::stub::DEFAULT_TRANSCRIPT;

    fn buffer() -> AudioBuffer {
        AudioBuffer::new(vec![0.1; 80_000], 16_000).unwrap()
    }

    #[tokio::test]
    async fn stub_engine_returns_default_transcript() {
        let config = Config::default();
        let engine = EngineBuilder::new(&config).build().unwrap();

        let transcription = engine.transcribe(&buffer()).await.unwrap();

        assert_eq!(transcription.text, DEFAULT_TRANSCRIPT);
        assert!(transcription.confidence.is_none());
    }

    #[tokio::test]
    async fn placeholder_override_flows_through() {
        let mut config = Config::default();
        config.asr.placeholder = Some("namaste".to_string());
        let engine = EngineBuilder::new(&config).build().unwrap();

        let transcription = engine.transcribe(&buffer()).await.unwrap();

        assert_eq!(transcription.text, "namaste");
    }

    #[tokio::test]
    async fn empty_backend_output_is_an_error() {
        let mut config = Config::default();
        config.asr.placeholder = Some("   ".to_string());
        let engine = EngineBuilder::new(&config).build().unwrap();

        let err = engine.transcribe(&buffer()).await.unwrap_err();

        assert!(matches!(err, AsrError::EmptyTranscription));
    }

    #[test]
    fn engine_reports_backend_and_language() {
        let config = Config::default();
        let engine = EngineBuilder::new(&config).build().unwrap();

        assert_eq!(engine.backend_name(), "stub");
        assert_eq!(engine.language(), "hi");
    }
}
