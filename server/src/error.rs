//! Request-level errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use image_engine::EngineError;

/// Everything that can end a `/process` request early.
///
/// Client mistakes map to 4xx, failures on our side to 500. The response
/// body is the plain-text `Display` output.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("POST only")]
    MethodNotAllowed,

    #[error("Could not parse form: {0}")]
    MalformedForm(String),

    #[error("Missing 'image' file field")]
    MissingFile,

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Failed to encode image: {0}")]
    EncodeFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MalformedForm(_)
            | Self::MissingFile
            | Self::InvalidImage(_)
            | Self::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            Self::EncodeFailure(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidImage(cause) => Self::InvalidImage(cause),
            EngineError::InvalidParameter { param, message } => {
                Self::InvalidParameter { param, message }
            }
            EngineError::Encode(cause) => Self::EncodeFailure(cause),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{message}");
        } else {
            tracing::warn!(status = status.as_u16(), "{message}");
        }
        (status, message).into_response()
    }
}
