use serde::Deserialize;

/// Audio decoding and validation configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AudioConfig {
    /// Target sample rate in Hz
    ///
    /// Mismatched uploads are resampled to this rate when `resample` is on.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Minimum accepted clip duration in seconds (inclusive)
    #[serde(default = "default_min_duration")]
    pub min_duration_seconds: f64,
    /// Maximum accepted clip duration in seconds (inclusive)
    #[serde(default = "default_max_duration")]
    pub max_duration_seconds: f64,
    /// Resample mismatched input instead of rejecting it
    #[serde(default = "default_resample")]
    pub resample: bool,
    /// Upper bound on concurrently running CPU-bound jobs
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            min_duration_seconds: default_min_duration(),
            max_duration_seconds: default_max_duration(),
            resample: default_resample(),
            workers: default_workers(),
        }
    }
}

const fn default_sample_rate() -> u32 {
    16_000
}

const fn default_min_duration() -> f64 {
    5.0
}

const fn default_max_duration() -> f64 {
    10.0
}

const fn default_resample() -> bool {
    true
}

const fn default_workers() -> usize {
    4
}
