use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Helper to create a JSON error response with the standard
/// `{ "error": { "message": message } }` envelope.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": { "message": message.into() } });
    (status, Json(body)).into_response()
}

/// Detail of an internal failure, attached to the response extensions of
/// every `500` produced by [`HttpError::Internal`].
///
/// The terminal error responder installed by
/// [`ErrorHandling`](crate::plugins::ErrorHandling) reads it to decide what the
/// client gets to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail(pub String);

pub enum HttpError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            HttpError::NotFound(msg) => error_response(StatusCode::NOT_FOUND, msg),
            HttpError::BadRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            HttpError::Internal(detail) => {
                let mut response =
                    error_response(StatusCode::INTERNAL_SERVER_ERROR, detail.clone());
                response.extensions_mut().insert(ErrorDetail(detail));
                response
            }
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            HttpError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            HttpError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl std::fmt::Debug for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for HttpError {}
