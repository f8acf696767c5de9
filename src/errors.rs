use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Database(#[from] anyhow::Error),

    #[error("invalid booking responses: {0}")]
    SchemaValidation(String),

    #[error("attendee not found")]
    AttendeeNotFound,

    #[error("booking was not persisted")]
    BookingNotPersisted,

    #[error("booking with id={0} was not found")]
    BookingNotFound(i64),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("output validation failed: {0}")]
    OutputValidation(#[from] validator::ValidationErrors),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::SchemaValidation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::AttendeeNotFound => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BookingNotPersisted => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BookingNotFound(_) => StatusCode::NOT_FOUND,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::OutputValidation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
