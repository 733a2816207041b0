use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use play_verify::PlayError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RelayError>;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid notification shape: {0}")]
    InvalidShape(String),

    #[error("Malformed push request: {0}")]
    BadPush(String),

    #[error("Failed to construct verification client: {0}")]
    VerifierInit(String),

    #[error("Subscription verification failed: {0}")]
    Verification(#[from] PlayError),

    #[error("Forward request failed: {0}")]
    Forward(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ResponseError for RelayError {
    fn error_response(&self) -> HttpResponse {
        let code = self.status_code();
        HttpResponse::build(code).json(ErrorResponse {
            error: self.to_string(),
            code: code.as_u16(),
        })
    }

    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::InvalidShape(_) | RelayError::BadPush(_) => StatusCode::BAD_REQUEST,
            RelayError::VerifierInit(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Verification(_) | RelayError::Forward(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
