use thiserror::Error;
use crate::domain::error::DomainError; // ドメインエラーをラップするため
use crate::infrastructure::error::InfrastructureError; // InfrastructureError をラップするため

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Watermarking failed: {0}")]
    WatermarkFailed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("The input ended before all answers were given.")]
    InputClosed,

    #[error(transparent)]
    DomainError(#[from] DomainError),

    #[error(transparent)]
    InfrastructureError(#[from] InfrastructureError),
}

// IntoResponse implementation for ApplicationError
use axum::response::{IntoResponse, Response};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApplicationError::WatermarkFailed(msg) => {
                tracing::error!("Watermarking failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApplicationError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApplicationError::InputClosed => (StatusCode::BAD_REQUEST, ApplicationError::InputClosed.to_string()),
            ApplicationError::DomainError(domain_err) => (StatusCode::BAD_REQUEST, domain_err.to_string()),
            ApplicationError::InfrastructureError(infra_err) => {
                tracing::warn!("InfrastructureError: {:?}", infra_err);
                match infra_err {
                    InfrastructureError::DomainErrorWrapper(_) => (StatusCode::BAD_REQUEST, infra_err.to_string()),
                    InfrastructureError::ImageLibError(_) => (StatusCode::UNPROCESSABLE_ENTITY, infra_err.to_string()),
                    InfrastructureError::FileNotFound(_) => (StatusCode::NOT_FOUND, infra_err.to_string()),
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, infra_err.to_string()),
                }
            }
        };
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
