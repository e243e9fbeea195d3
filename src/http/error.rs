//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::{PipelineError, UpstreamError};

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (validation error)
    BadRequest(String),
    /// Generative backend or data provider failure
    Upstream(String),
    /// Plan output that could not be accepted
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Upstream(msg) | AppError::Internal(msg) => {
                error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Validation(_) => AppError::BadRequest(err.to_string()),
            PipelineError::Generation(_) => AppError::Upstream(err.to_string()),
            PipelineError::Plan(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{FailureKind, GenerationFailed, PlanError, ValidationError};

    #[test]
    fn pipeline_errors_map_to_status_codes() {
        let cases = [
            (PipelineError::Validation(ValidationError::MissingField("lat")), StatusCode::BAD_REQUEST),
            (
                PipelineError::Generation(GenerationFailed::new(FailureKind::Auth, "401")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                PipelineError::Plan(PlanError::MalformedOutput("eof".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }
}
