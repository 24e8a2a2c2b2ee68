//! Error types for the meeting API server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use change_engine::StoreError;
use serde::Serialize;
use thiserror::Error;

use crate::llm::LlmError;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ReadError(String),

    #[error("{0}")]
    WriteError(String),

    #[error("LLM service error: {0}")]
    UpstreamService(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadInput(String),
}

impl ServerError {
    pub fn code(&self) -> &'static str {
        match self {
            ServerError::NotFound(_) => "NOT_FOUND",
            ServerError::ReadError(_) => "READ_ERROR",
            ServerError::WriteError(_) => "WRITE_ERROR",
            ServerError::UpstreamService(_) => "UPSTREAM_SERVICE_ERROR",
            ServerError::Validation(_) => "VALIDATION_ERROR",
            ServerError::BadInput(_) => "BAD_INPUT",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::ReadError(_) | ServerError::WriteError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServerError::UpstreamService(_) => StatusCode::BAD_GATEWAY,
            ServerError::Validation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::BadInput(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        } else {
            tracing::debug!(code = self.code(), "{}", self);
        }

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: self.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ServerError::NotFound(err.to_string()),
            StoreError::Read(_) => ServerError::ReadError(err.to_string()),
            StoreError::Write(_) => ServerError::WriteError(err.to_string()),
        }
    }
}

impl From<LlmError> for ServerError {
    fn from(err: LlmError) -> Self {
        ServerError::UpstreamService(err.to_string())
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadInput(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_keep_their_kind() {
        let err: ServerError = StoreError::NotFound("db.json".into()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "Document store not found: db.json");

        let err: ServerError = StoreError::Read("bad json".into()).into();
        assert_eq!(err.code(), "READ_ERROR");

        let err: ServerError = StoreError::Write("disk full".into()).into();
        assert_eq!(err.code(), "WRITE_ERROR");
    }

    #[test]
    fn test_llm_errors_are_upstream() {
        let err: ServerError = LlmError::Api(429, "quota".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.code(), "UPSTREAM_SERVICE_ERROR");
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn test_bad_input_is_400() {
        let err = ServerError::BadInput("Message cannot be empty".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
