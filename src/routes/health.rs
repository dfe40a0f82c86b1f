use crate::handler::health_handler;
use crate::state::health_state::HealthState;
use axum::{Router, routing::get};

pub fn routes() -> Router<HealthState> {
    Router::new().route("/health", get(health_handler::health_check))
}
