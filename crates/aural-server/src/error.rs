use aural_core::HttpError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Error payload surfaced to API consumers
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Response-ready error carrying an HTTP status and a client-safe detail
///
/// Client errors surface their specific reason code; server errors are
/// logged here and surface only a generic reason.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal-error")
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl<E: HttpError> From<E> for ApiError {
    fn from(error: E) -> Self {
        let status = error.status_code();

        if status.is_server_error() {
            tracing::error!(error = %error, "request pipeline failed");
        } else {
            tracing::debug!(error = %error, reason = error.reason(), "request rejected");
        }

        Self::new(status, error.reason())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { detail: self.detail };
        (self.status, Json(body)).into_response()
    }
}
