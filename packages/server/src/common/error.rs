//! The two-layer error taxonomy used across the scheduling core.
//!
//! `StoreError` is raised only by the domain store (C1); `DomainError` is
//! raised by the orchestrator (C4) and applier (C5) when a precondition is
//! violated. Both carry an `axum::response::IntoResponse` impl so the HTTP
//! boundary can map them without each handler re-deriving the status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("business rule error: {0}")]
    BusinessRule(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Conflict(_) => StatusCode::BAD_REQUEST,
            StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let detail = self.to_string();
        if matches!(self, StoreError::Database(_)) {
            tracing::error!(error = %detail, "store error");
        }
        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        match self {
            DomainError::Validation(detail) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { detail })).into_response()
            }
            DomainError::BusinessRule(detail) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorBody { detail })).into_response()
            }
            DomainError::Store(store_err) => store_err.into_response(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type DomainResult<T> = Result<T, DomainError>;
