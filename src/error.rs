use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Process-level failures: configuration and startup. These never turn into
/// a relay response; they abort before the server accepts traffic.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

/// Early-exit failures of the inbound contract. Each maps to a fixed
/// status and plain-text body, and none of them reach the provider.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Bad Request")]
    MissingBody,

    #[error("Invalid request body")]
    InvalidBody,

    #[error("Invalid amount")]
    InvalidAmount,
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = match self {
            RequestError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RequestError::MissingBody | RequestError::InvalidBody | RequestError::InvalidAmount => {
                StatusCode::BAD_REQUEST
            }
        };

        (status, self.to_string()).into_response()
    }
}
