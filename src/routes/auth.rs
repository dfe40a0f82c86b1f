use crate::handler::{auth_handler, refresh_handler, register_handler};
use crate::state::auth_state::AuthState;
use axum::{Router, routing::post};

pub fn routes() -> Router<AuthState> {
    Router::<AuthState>::new()
        .route("/register", post(register_handler::register))
        .route("/login", post(auth_handler::login))
        .route("/refresh", post(refresh_handler::refresh))
        .route("/logout", post(refresh_handler::logout))
}
