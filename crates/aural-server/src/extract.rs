use axum::body::Body;
use axum::http::StatusCode;

use crate::error::ApiError;

/// An uploaded audio clip parsed from multipart form data
#[derive(Debug)]
pub struct AudioUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

/// Extractor for the `file` field of a multipart upload
pub struct ExtractUpload(pub AudioUpload);

/// Body limit for audio uploads (32 MiB)
const BODY_LIMIT_BYTES: usize = 32 << 20;

impl<S> axum::extract::FromRequest<S> for ExtractUpload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        // Verify content type is multipart/form-data
        let content_type = parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("multipart/form-data") {
            return Err(ApiError::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "expected 'Content-Type: multipart/form-data'",
            ));
        }

        let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES)
            .await
            .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, format!("failed to read request body: {e}")))?;

        // Reassemble the request for multipart parsing
        let mut rebuilt = http::Request::builder().method(parts.method.clone()).uri(parts.uri.clone());

        for (key, value) in &parts.headers {
            rebuilt = rebuilt.header(key, value);
        }

        let rebuilt = rebuilt
            .body(Body::from(bytes))
            .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, format!("failed to rebuild request: {e}")))?;

        let mut multipart = axum::extract::Multipart::from_request(rebuilt, &())
            .await
            .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, format!("failed to parse multipart form: {e}")))?;

        let mut audio: Option<Vec<u8>> = None;
        let mut filename = String::from("audio.wav");
        let mut file_content_type = String::new();

        while let Ok(Some(field)) = multipart.next_field().await {
            let field_name = field.name().unwrap_or("").to_string();

            if field_name == "file" {
                if let Some(name) = field.file_name() {
                    filename = name.to_string();
                }
                if let Some(ct) = field.content_type() {
                    file_content_type = ct.to_string();
                }
                audio = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, format!("failed to read audio data: {e}")))?
                        .to_vec(),
                );
            }
            // Skip unknown fields
        }

        let audio = audio.ok_or_else(|| {
            ApiError::new(StatusCode::BAD_REQUEST, "missing required 'file' field in multipart form")
        })?;

        Ok(Self(AudioUpload {
            bytes: audio,
            filename,
            content_type: file_content_type,
        }))
    }
}
