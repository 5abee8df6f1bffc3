use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::ApiError;
use crate::extract::ExtractUpload;
use crate::pipeline::Pipeline;

/// Externally visible result payload
#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub filename: String,
    /// Seconds with two decimals, e.g. "5.00s"
    pub duration: String,
    /// E.g. "16000 Hz"
    pub sample_rate: String,
    pub features: audio::FeatureSet,
    pub transcription: String,
}

/// Handle transcription requests
pub(crate) async fn transcribe(
    State(pipeline): State<Arc<Pipeline>>,
    ExtractUpload(upload): ExtractUpload,
) -> Result<Json<TranscribeResponse>, ApiError> {
    tracing::debug!(filename = %upload.filename, bytes = upload.bytes.len(), "transcription requested");

    let filename = upload.filename.clone();
    let analysis = pipeline.process(upload).await?;

    tracing::debug!(duration_seconds = analysis.duration_seconds, "transcription complete");

    Ok(Json(TranscribeResponse {
        filename,
        duration: format!("{:.2}s", analysis.duration_seconds),
        sample_rate: format!("{} Hz", analysis.sample_rate),
        features: analysis.features,
        transcription: analysis.transcription.text,
    }))
}
