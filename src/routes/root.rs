use super::{auth, health, records};
use crate::config::database::Database;
use crate::config::settings::Settings;
use crate::error::token_error::TokenError;
use crate::middleware::auth as auth_middleware;
use crate::repository::Repositories;
use crate::service::admin_session::AdminSession;
use crate::service::auth_service::AuthService;
use crate::service::refresh_token_service::RefreshTokenService;
use crate::service::token_service::TokenService;
use crate::state::auth_state::AuthState;
use crate::state::health_state::HealthState;
use crate::state::record_state::RecordState;
use crate::state::token_state::TokenState;
use axum::{Router, middleware};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the whole application. Fails only when the signing secret is unusable.
pub fn routes(
    settings: &Settings,
    repositories: Repositories,
    database: Option<Arc<Database>>,
) -> Result<Router, TokenError> {
    let token_service = TokenService::from_settings(settings)?;
    let admin_session = AdminSession::new();
    let auth_service = AuthService::new(&repositories, settings, token_service.clone(), admin_session.clone());
    let refresh_token_service =
        RefreshTokenService::new(&repositories, settings, token_service.clone(), admin_session);

    let auth_state = AuthState::new(auth_service.clone(), refresh_token_service);
    let token_state = TokenState::new(token_service, auth_service.clone());
    let record_state = RecordState::new(repositories, auth_service);
    let health_state = HealthState::new(settings.storage_backend, database);

    let merged_router = auth::routes()
        .with_state(auth_state)
        .merge(
            records::routes()
                .route_layer(middleware::from_fn_with_state(token_state, auth_middleware::authenticate))
                .with_state(record_state),
        )
        .merge(health::routes().with_state(health_state));

    let app_router = Router::new()
        .nest("/api", merged_router)
        .layer(TraceLayer::new_for_http());

    Ok(app_router)
}
