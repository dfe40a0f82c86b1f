use crate::handler::record_handler;
use crate::middleware::authorization::{RequiredRoles, authorize};
use crate::state::record_state::RecordState;
use axum::routing::{MethodRouter, delete, get, post};
use axum::{Router, middleware};

/// Wraps one method route in the role check for `roles`.
fn gated(route: MethodRouter<RecordState>, roles: RequiredRoles) -> MethodRouter<RecordState> {
    route.route_layer(middleware::from_fn_with_state(roles, authorize))
}

/// Record routes. The caller must already be attached by the authentication
/// layer that `root` puts around this router.
pub fn routes() -> Router<RecordState> {
    Router::new()
        .route(
            "/companies",
            gated(get(record_handler::list_companies), RequiredRoles::ANY)
                .merge(gated(post(record_handler::create_company), RequiredRoles::ADMIN)),
        )
        .route(
            "/employees",
            gated(get(record_handler::list_employees), RequiredRoles::ADMIN),
        )
        .route(
            "/employees/{identity}",
            gated(delete(record_handler::delete_employee), RequiredRoles::ADMIN),
        )
        .route("/infocards", gated(get(record_handler::list_info_cards), RequiredRoles::ADMIN))
        .route("/documents", gated(get(record_handler::list_documents), RequiredRoles::ADMIN))
        .route(
            "/checkpoints",
            gated(get(record_handler::list_checkpoints), RequiredRoles::ADMIN),
        )
}
