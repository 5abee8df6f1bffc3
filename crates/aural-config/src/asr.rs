use serde::Deserialize;

/// Transcription engine configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AsrConfig {
    /// Engine type
    #[serde(default)]
    pub engine: AsrEngineType,
    /// Language hint passed to the engine (ISO 639-1)
    #[serde(default = "default_language")]
    pub language: String,
    /// Canned transcript returned by the stub engine
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl Default for AsrConfig {
    fn default() -> Self {
        Self {
            engine: AsrEngineType::default(),
            language: default_language(),
            placeholder: None,
        }
    }
}

/// Supported transcription engines
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AsrEngineType {
    /// Canned placeholder output, no model
    #[default]
    Stub,
}

fn default_language() -> String {
    "hi".to_string()
}
