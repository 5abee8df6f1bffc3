pub mod stub;

use async_trait::async_trait;
use audio::AudioBuffer;

use crate::{error::Result, types::Transcription};

/// Trait for transcription backend implementations
///
/// Backends must not block the calling task: CPU-bound model work belongs
/// on `spawn_blocking` inside the implementation.
#[async_trait]
pub trait AsrBackend: Send + Sync {
    /// Transcribe a validated buffer to text
    async fn transcribe(&self, buffer: &AudioBuffer, language: &str) -> Result<Transcription>;

    /// Get the backend name
    fn name(&self) -> &str;
}
