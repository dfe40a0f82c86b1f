pub mod auth_error;
pub mod authorization_error;
pub mod config_error;
pub mod request_error;
pub mod store_error;
pub mod token_error;

use crate::config::logging::secure_log;
use crate::response::app_response::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Unified handler error. Each source error renders its own response; server
/// faults are logged here before their detail is dropped.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Authorization(#[from] authorization_error::AuthorizationError),
    #[error(transparent)]
    Auth(#[from] auth_error::AuthError),
    #[error(transparent)]
    Token(#[from] token_error::TokenError),
    #[error(transparent)]
    Store(#[from] store_error::StoreError),
    #[error(transparent)]
    Request(#[from] request_error::RequestError),
    #[error(transparent)]
    Config(#[from] config_error::ConfigError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Authorization(_) => StatusCode::FORBIDDEN,
            AppError::Auth(error) => error.status_code(),
            AppError::Token(error) => error.status_code(),
            AppError::Store(error) => error.status_code(),
            AppError::Request(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            secure_log::secure_error!("Request failed", self);
        } else {
            tracing::debug!(status = status_code.as_u16(), error = %self, "Request rejected");
        }

        match self {
            AppError::Authorization(error) => error.into_response(),
            AppError::Auth(error) => error.into_response(),
            AppError::Token(error) => error.into_response(),
            AppError::Store(error) => error.into_response(),
            AppError::Request(error) => error.into_response(),
            AppError::Config(_) => ErrorResponse::internal().into_response(),
        }
    }
}
