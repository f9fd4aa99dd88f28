use axum::{http::StatusCode, response::IntoResponse, Json};
use minestats_core::StatsError;
use serde::Serialize;

#[derive(Debug)]
pub(crate) enum AppError {
    NotFound(String),
    BadRequest(String),
    UpstreamError(String),
    InvalidUpstreamData(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    code: String,
}

impl AppError {
    fn parts(self) -> (StatusCode, String, &'static str) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            AppError::UpstreamError(msg) => (StatusCode::BAD_GATEWAY, msg, "UPSTREAM_ERROR"),
            AppError::InvalidUpstreamData(msg) => {
                (StatusCode::BAD_GATEWAY, msg, "INVALID_UPSTREAM_DATA")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, code) = self.parts();
        if status.is_server_error() {
            tracing::warn!(%status, code, "{message}");
        }

        (
            status,
            Json(ErrorResponse {
                message,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<StatsError> for AppError {
    fn from(e: StatsError) -> Self {
        AppError::InvalidUpstreamData(e.to_string())
    }
}

impl From<eyre::Report> for AppError {
    fn from(e: eyre::Report) -> Self {
        AppError::UpstreamError(format!("{e:#}"))
    }
}

pub(crate) type Result<T> = std::result::Result<T, AppError>;
