//! API error type and HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use simplenotes_core::NoteServiceError;

/// Handler-level error mapped onto an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(&'static str),
    NotFound(String),
    Internal(String),
}

impl From<NoteServiceError> for ApiError {
    fn from(err: NoteServiceError) -> Self {
        match err {
            NoteServiceError::NotFound(id) => Self::NotFound(format!("note {id} not found")),
            // Validation is answered at the handler level with a form echo;
            // anything else reaching this conversion is a server-side failure.
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message.to_string()),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Internal(details) => {
                // Storage failures stay generic on the wire.
                error!("event=request_failed module=web status=error error={details}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
