use crate::entity::caller::{Caller, Role};
use crate::error::authorization_error::AuthorizationError;
use axum::extract::{Request, State};
use axum::{middleware::Next, response::IntoResponse};
use tracing::{debug, warn};

/// The roles a route admits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequiredRoles(pub &'static [Role]);

impl RequiredRoles {
    pub const ADMIN: RequiredRoles = RequiredRoles(&[Role::Admin]);
    pub const ANY: RequiredRoles = RequiredRoles(&[Role::Admin, Role::User]);

    pub fn admits(&self, role: Role) -> bool {
        self.0.contains(&role)
    }
}

/// Runs after `authenticate`; a request without a caller is refused.
pub async fn authorize(
    State(required): State<RequiredRoles>,
    req: Request,
    next: Next,
) -> Result<impl IntoResponse, AuthorizationError> {
    let caller = req.extensions().get::<Caller>().ok_or(AuthorizationError::MissingCaller)?;

    if !required.admits(caller.role) {
        warn!(
            "SECURITY: {} ({}) denied access to {}",
            caller.identity,
            caller.role,
            req.uri().path()
        );
        return Err(AuthorizationError::RoleNotPermitted { role: caller.role });
    }

    debug!("Authorization granted for {} on {}", caller.identity, req.uri().path());
    Ok(next.run(req).await)
}
