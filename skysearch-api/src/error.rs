use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skysearch_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Rejected before any provider call
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Validation(msg) | AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, msg)
            }
            // Downstream failures keep their text so callers can see what the provider said
            AppError::Core(err) => {
                tracing::error!("Search failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
