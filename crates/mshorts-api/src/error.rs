//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use mshorts_pipeline::PipelineError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Pipeline(e) => match e {
                PipelineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                PipelineError::SearchExhausted => StatusCode::NOT_FOUND,
                PipelineError::Transport(_) => StatusCode::BAD_GATEWAY,
                PipelineError::Configuration(_) | PipelineError::Assembly(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_error_status_mapping() {
        let exhausted = ApiError::from(PipelineError::SearchExhausted);
        assert_eq!(exhausted.status_code(), StatusCode::NOT_FOUND);

        let transport = ApiError::from(PipelineError::Transport("reset".to_string()));
        assert_eq!(transport.status_code(), StatusCode::BAD_GATEWAY);

        let invalid = ApiError::from(PipelineError::InvalidInput("blank".to_string()));
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let assembly = ApiError::from(PipelineError::Assembly("encode".to_string()));
        assert_eq!(assembly.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
