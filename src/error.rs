//! Error types and their HTTP rendering.
use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Per-request failures. Every variant renders as a JSON body, none abort the process.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("invalid input: {}", .0.join(", "))]
    BadRequest(Vec<String>),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized("Invalid credentials".to_string())
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized("Unauthorized".to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            ApiError::Unauthorized(message) => json!({
                "message": message,
                "error": "Unauthorized",
                "statusCode": status.as_u16(),
            }),
            ApiError::BadRequest(reasons) => json!({
                "message": reasons,
                "error": "Bad Request",
                "statusCode": status.as_u16(),
            }),
            // details stay in the log
            ApiError::Internal(detail) => {
                log::error!("internal error: {}", detail);
                json!({
                    "message": "Internal server error",
                    "statusCode": status.as_u16(),
                })
            }
        };
        HttpResponse::build(status).json(body)
    }
}

/// Routes malformed JSON bodies into the same 400 shape as field validation.
pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(vec![err.to_string()]).into()
}

/// Startup failures; the server refuses to bind when one occurs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,

    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),
}
