#![allow(clippy::must_use_candidate)]

pub mod asr;
pub mod audio;
mod env;
pub mod health;
mod loader;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use asr::*;
pub use audio::*;
pub use health::*;
pub use server::*;
pub use telemetry::TelemetryConfig;

/// Top-level Aural configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Audio decoding and validation configuration
    #[serde(default)]
    pub audio: AudioConfig,
    /// Transcription engine configuration
    #[serde(default)]
    pub asr: AsrConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
