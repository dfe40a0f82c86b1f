use crate::error::store_error::StoreError;
use crate::error::token_error::TokenError;
use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Identity is not registered")]
    UnknownIdentity,
    #[error("Password does not match")]
    InvalidCredentials,
    #[error("Identity is already registered")]
    DuplicateIdentity,
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error("Refresh token is not the active one")]
    RefreshMismatch,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Store(StoreError),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UnknownIdentity
            | AuthError::InvalidCredentials
            | AuthError::Hashing(_)
            | AuthError::RefreshMismatch => StatusCode::UNAUTHORIZED,
            AuthError::DuplicateIdentity => StatusCode::CONFLICT,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Token(error) => error.status_code(),
            AuthError::Store(error) => error.status_code(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::UnknownIdentity | AuthError::InvalidCredentials | AuthError::Hashing(_) => {
                "INVALID_CREDENTIALS"
            }
            AuthError::RefreshMismatch => "INVALID_REFRESH_TOKEN",
            AuthError::DuplicateIdentity => "DUPLICATE_IDENTITY",
            AuthError::Validation(_) => "VALIDATION_ERROR",
            AuthError::Token(error) => error.code(),
            AuthError::Store(error) => error.code(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let code = self.code();
        let message = match self {
            AuthError::Token(error) => return error.into_response(),
            AuthError::Store(error) => return error.into_response(),
            // Same answer for unknown identity and wrong password.
            AuthError::UnknownIdentity | AuthError::InvalidCredentials | AuthError::Hashing(_) => {
                "Invalid login or password".to_string()
            }
            AuthError::RefreshMismatch => "Invalid refresh token".to_string(),
            other => other.to_string(),
        };
        ErrorResponse::new(status_code, code, message).into_response()
    }
}
