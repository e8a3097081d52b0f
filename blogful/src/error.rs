use axum::response::{IntoResponse, Response};
use blogful_core::HttpError;

pub const ARTICLE_NOT_FOUND: &str = "Article doesn't exist";

pub enum AppError {
    NotFound,
    ValidationFailed(String),
    StorageFailure(sqlx::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound => f.write_str(ARTICLE_NOT_FOUND),
            AppError::ValidationFailed(msg) => f.write_str(msg),
            AppError::StorageFailure(err) => write!(f, "storage failure: {err}"),
        }
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::StorageFailure(err) => Some(err),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::StorageFailure(err)
    }
}

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound => HttpError::NotFound(ARTICLE_NOT_FOUND.to_string()),
            AppError::ValidationFailed(msg) => HttpError::BadRequest(msg),
            AppError::StorageFailure(err) => HttpError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        HttpError::from(self).into_response()
    }
}
