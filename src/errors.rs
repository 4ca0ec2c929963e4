use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;
use tracing::error;

use crate::models::api_response::error_response;

/// Everything a handler can fail with, mapped onto the HTTP status and the
/// `{success: false, message}` body the frontend expects.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("puzzle source request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("database operation failed: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Validation/auth/not-found messages are written for the player;
        // everything else is logged and replaced with a generic message.
        let message = match self {
            ApiError::Validation(message)
            | ApiError::Unauthorized(message)
            | ApiError::NotFound(message) => message.clone(),
            ApiError::Upstream(err) => {
                error!("puzzle source request failed: {err}");
                "Failed to load puzzle. Please try again.".to_string()
            }
            ApiError::Database(err) => {
                error!("database operation failed: {err}");
                "Server error".to_string()
            }
            ApiError::Internal(detail) => {
                error!("internal error: {detail}");
                "Server error".to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(error_response(&message))
    }
}

/// Keeps malformed-body rejections in the same response envelope as every
/// other error instead of actix's default plain-text body.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(error_response(&err.to_string()));
    InternalError::from_response(err, response).into()
}
