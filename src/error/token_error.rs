use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Missing credentials")]
    Missing,
    #[error("Invalid token: {0}")]
    Invalid(String),
    #[error("Token has expired")]
    Expired,
    #[error("Token is not valid for this use")]
    WrongKind,
    #[error("Token creation failed: {0}")]
    Creation(String),
    #[error("Signing secret must be at least {0} bytes")]
    WeakSecret(usize),
}

impl TokenError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TokenError::Creation(_) | TokenError::WeakSecret(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Missing => "MISSING_CREDENTIALS",
            TokenError::Expired => "TOKEN_EXPIRED",
            TokenError::Invalid(_) | TokenError::WrongKind => "INVALID_TOKEN",
            TokenError::Creation(_) | TokenError::WeakSecret(_) => "INTERNAL_ERROR",
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            TokenError::Missing => "Missing credentials",
            TokenError::Expired => "Token has expired",
            TokenError::Invalid(_) | TokenError::WrongKind => "Invalid token",
            TokenError::Creation(_) | TokenError::WeakSecret(_) => "Internal server error",
        }
    }
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        ErrorResponse::new(self.status_code(), self.code(), self.public_message()).into_response()
    }
}
