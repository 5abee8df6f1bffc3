use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use asr::Transcription;
use audio::{DecodeOptions, DurationLimits, FeatureSet};
use aural_config::Config;
use tempfile::NamedTempFile;
use tokio::sync::Semaphore;

use crate::error::ApiError;
use crate::extract::AudioUpload;

/// Request pipeline state, built once at startup and shared across requests
///
/// Holds the ASR engine handle (read-only during request handling) and the
/// semaphore bounding concurrent CPU-bound jobs.
pub struct Pipeline {
    engine: Arc<asr::Engine>,
    decode_options: DecodeOptions,
    limits: DurationLimits,
    spool_dir: Option<PathBuf>,
    jobs: Semaphore,
}

/// Outcome of one successful pipeline run
#[derive(Debug)]
pub struct Analysis {
    pub duration_seconds: f64,
    pub sample_rate: u32,
    pub features: FeatureSet,
    pub transcription: Transcription,
}

impl Pipeline {
    pub fn new(config: &Config, engine: Arc<asr::Engine>) -> Self {
        Self {
            engine,
            decode_options: DecodeOptions {
                target_sample_rate: config.audio.sample_rate,
                resample: config.audio.resample,
            },
            limits: DurationLimits {
                min_seconds: config.audio.min_duration_seconds,
                max_seconds: config.audio.max_duration_seconds,
            },
            spool_dir: config.server.spool_dir.clone(),
            jobs: Semaphore::new(config.audio.workers),
        }
    }

    /// Run decode → validate → extract → transcribe for one upload
    ///
    /// The upload is spooled to a uniquely named temp file that is removed
    /// on every exit path, success or failure. Decoding and feature
    /// extraction run on the blocking pool under a concurrency permit so
    /// the accepting task is never blocked.
    pub async fn process(&self, upload: AudioUpload) -> Result<Analysis, ApiError> {
        audio::validate_format(&upload.filename, &upload.content_type)?;

        let spool = self.spool(&upload.bytes)?;

        let permit = self.jobs.acquire().await.map_err(|_| ApiError::internal())?;

        let decode_options = self.decode_options;
        let path = spool.path().to_path_buf();
        let buffer = tokio::task::spawn_blocking(move || audio::decode_wav_file(&path, decode_options))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "decode task failed");
                ApiError::internal()
            })??;

        audio::validate_buffer(&buffer, self.decode_options.target_sample_rate, self.limits)?;

        let (buffer, features) = tokio::task::spawn_blocking(move || {
            let features = audio::extract(&buffer);
            (buffer, features)
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "feature extraction task failed");
            ApiError::internal()
        })?;
        let features = features?;

        drop(permit);

        let transcription = self.engine.transcribe(&buffer).await?;

        let analysis = Analysis {
            duration_seconds: buffer.duration_seconds(),
            sample_rate: buffer.sample_rate(),
            features,
            transcription,
        };

        drop(spool);

        Ok(analysis)
    }

    /// Write the upload to a scoped temp file
    fn spool(&self, bytes: &[u8]) -> Result<NamedTempFile, ApiError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("aural-").suffix(".wav");

        let created = match &self.spool_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        };

        let mut file = created.map_err(|e| {
            tracing::error!(error = %e, "failed to create spool file");
            ApiError::internal()
        })?;

        file.write_all(bytes).and_then(|()| file.flush()).map_err(|e| {
            tracing::error!(error = %e, "failed to write spool file");
            ApiError::internal()
        })?;

        Ok(file)
    }
}
