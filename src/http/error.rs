use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error type for the HTTP API surface.
///
/// Store failures carry only the underlying message string; no structured
/// error codes are exposed externally.
#[derive(Debug)]
pub enum HttpError {
    TooManyRequests,
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "daily request budget exceeded".to_string(),
            ),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
