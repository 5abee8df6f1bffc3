//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;

use aural_config::Config;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    ///
    /// Binds to port 0 so each test server gets its own port.
    pub fn new() -> Self {
        let mut config = Config::default();
        config.server.listen_address = Some(SocketAddr::from(([127, 0, 0, 1], 0)));
        Self { config }
    }

    /// Set the accepted duration window
    pub fn with_duration_window(mut self, min_seconds: f64, max_seconds: f64) -> Self {
        self.config.audio.min_duration_seconds = min_seconds;
        self.config.audio.max_duration_seconds = max_seconds;
        self
    }

    /// Spool uploads into the given directory
    pub fn with_spool_dir(mut self, dir: &Path) -> Self {
        self.config.server.spool_dir = Some(dir.to_path_buf());
        self
    }

    /// Set the stub engine's canned transcript
    pub fn with_placeholder(mut self, text: &str) -> Self {
        self.config.asr.placeholder = Some(text.to_string());
        self
    }

    /// Reject mismatched sample rates instead of resampling
    pub fn without_resampling(mut self) -> Self {
        self.config.audio.resample = false;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
