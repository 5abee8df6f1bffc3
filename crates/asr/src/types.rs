/// Result of transcribing one clip
#[derive(Debug, Clone)]
pub struct Transcription {
    /// Transcribed text
    pub text: String,
    /// Model confidence in [0, 1], when the backend reports one
    pub confidence: Option<f32>,
}
