#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Transcription stage
//!
//! The [`Engine`] owns a pluggable [`backend::AsrBackend`] selected from
//! configuration. It is built once at startup, shared across requests
//! read-only, and replaced wholesale when a real model backend lands.

pub mod backend;
mod engine;
mod error;
mod types;

use std::sync::Arc;

pub use engine::{Engine, EngineBuilder};
pub use error::{AsrError, Result};
pub use types::Transcription;

/// Build the ASR engine from configuration
///
/// # Errors
///
/// Returns an error if the engine fails to initialize
pub fn build_engine(config: &aural_config::Config) -> anyhow::Result<Arc<Engine>> {
    let engine = Arc::new(
        EngineBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize ASR engine: {e}"))?,
    );
    Ok(engine)
}
