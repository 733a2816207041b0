use thiserror::Error;

/// Play Developer API Client Error Types
#[derive(Error, Debug)]
pub enum PlayError {
    #[error("Failed to parse service account key: {0}")]
    KeyParseError(String),

    #[error("Failed to encode JWT: {0}")]
    JwtEncodeError(String),

    #[error("Failed to get access token: {0}")]
    TokenError(String),

    #[error("Token request failed with status: {0}")]
    TokenRequestFailed(String),

    #[error("Failed to parse token response: {0}")]
    TokenParseError(String),

    #[error("Subscription lookup request failed: {0}")]
    RequestError(String),

    #[error("Failed to parse subscription response: {0}")]
    ResponseParseError(String),

    #[error("Play API error: {0} - {1}")]
    ApiError(String, String),
}
