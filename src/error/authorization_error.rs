use crate::entity::caller::Role;
use crate::response::app_response::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Role '{role}' may not access this route")]
    RoleNotPermitted { role: Role },
    #[error("No authenticated caller on the request")]
    MissingCaller,
}

impl IntoResponse for AuthorizationError {
    fn into_response(self) -> Response {
        tracing::debug!(reason = %self, "Access denied");
        ErrorResponse::new(StatusCode::FORBIDDEN, "FORBIDDEN", "Access denied").into_response()
    }
}
