//! Unified error handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use transmarin_engine::Error as EngineError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

fn engine_status(e: &EngineError) -> StatusCode {
    match e {
        EngineError::UnknownCollection(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidDate(_)
        | EngineError::InvalidRecord { .. }
        | EngineError::Serialization(_) => StatusCode::BAD_REQUEST,
        EngineError::QuotaExceeded { .. } => StatusCode::INSUFFICIENT_STORAGE,
        EngineError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        EngineError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match &self {
            AppError::Engine(e) => {
                let status = engine_status(e);
                if status.is_server_error() {
                    tracing::error!("Engine error: {:?}", e);
                    (status, "Storage error".to_string(), Some(e.to_string()))
                } else {
                    tracing::warn!("Engine error: {:?}", e);
                    (status, e.to_string(), None)
                }
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string(), None),
            AppError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                "Forbidden".to_string(),
                Some(msg.clone()),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(msg.clone()),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, AppError>;
