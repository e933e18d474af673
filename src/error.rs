//! HTTP error responses

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use crate::analysis::AnalysisError;
use crate::models::ErrorResponse;

/// Errors returned by the API handlers, rendered as `{"detail": ...}`
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body was missing, malformed, or did not match the record schema
    #[error("{}", .0.body_text())]
    InvalidRequest(#[from] JsonRejection),

    /// Scoring failed; the whole request is rejected
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(rejection) => rejection.status(),
            ApiError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        if status.is_server_error() {
            error!(%status, %detail, "request failed");
        } else {
            warn!(%status, %detail, "request rejected");
        }

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
