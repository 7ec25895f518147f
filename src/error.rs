//! Unified error handling for request handlers.
//!
//! Handlers return `AppError`, which renders as a plain status response.
//! Database errors are classified here so that a UNIQUE violation becomes a
//! conflict and a missing row becomes a not-found, instead of a 500.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("authentication required")]
    Unauthorized,

    #[error("malformed form submission: {0}")]
    Multipart(#[from] MultipartError),

    #[error("template rendering failed")]
    Template(#[from] askama::Error),

    #[error("database error")]
    Database(sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound("no such record".to_string()),
            sqlx::Error::Database(db_err)
                if db_err.message().contains("UNIQUE constraint failed") =>
            {
                AppError::Conflict("a record with this identifier already exists".to_string())
            }
            _ => AppError::Database(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            AppError::Unauthorized => Redirect::to("/").into_response(),
            AppError::Multipart(err) => {
                (StatusCode::BAD_REQUEST, format!("malformed form submission: {err}"))
                    .into_response()
            }
            AppError::Template(err) => {
                tracing::error!(error = %err, "template rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "template error".to_string()).into_response()
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database error".to_string()).into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string()).into_response()
            }
        }
    }
}
