use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use core_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaintingError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Search backend unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Failed to decode document: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type PaintingResult<T> = Result<T, PaintingError>;

impl From<reqwest::Error> for PaintingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PaintingError::Decode(err.to_string())
        } else {
            PaintingError::StoreUnavailable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PaintingError {
    fn from(err: serde_json::Error) -> Self {
        PaintingError::Decode(err.to_string())
    }
}

impl From<ConfigError> for PaintingError {
    fn from(err: ConfigError) -> Self {
        PaintingError::Config(err.to_string())
    }
}

/// Convert PaintingError to AppError for standardized HTTP error responses
impl From<PaintingError> for AppError {
    fn from(err: PaintingError) -> Self {
        match err {
            PaintingError::NotFound(msg) => AppError::NotFound(msg),
            PaintingError::InvalidArgument(msg) => AppError::BadRequest(msg),
            PaintingError::StoreUnavailable(msg) => AppError::ServiceUnavailable(msg),
            PaintingError::Decode(msg) => AppError::BadGateway(msg),
            PaintingError::Config(msg) => {
                AppError::InternalServerError(format!("Config error: {}", msg))
            }
        }
    }
}

impl IntoResponse for PaintingError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
