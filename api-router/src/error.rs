use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::error::AppError;
use serde_json::json;
use tracing::error;

/// Wraps `AppError` for the HTTP surface: caller mistakes map to 422,
/// retryable dependency failures to 503 with the originating stage named,
/// everything else to 500.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match &err {
            AppError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            other if other.is_retryable() => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {err}");
        }

        let body = json!({
            "error": err.to_string(),
            "stage": err.failed_stage(),
            "retryable": err.is_retryable(),
        });

        (status, Json(body)).into_response()
    }
}
