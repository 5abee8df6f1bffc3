use std::path::PathBuf;

use clap::Parser;

/// Aural audio analysis service
#[derive(Debug, Parser)]
#[command(name = "aural", about = "HTTP service for WAV validation, feature extraction, and transcription")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "aural.toml", env = "AURAL_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "AURAL_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
