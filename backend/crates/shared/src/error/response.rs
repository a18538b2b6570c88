//! HTTP rendering of [`AppError`] (feature `axum`)

use super::app_error::AppError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Clients always receive `{"error": "<message>"}`; the source never leaves the server.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(serde_json::json!({ "error": self.message() }))).into_response()
    }
}
