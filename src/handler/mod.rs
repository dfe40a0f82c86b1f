pub mod auth_handler;
pub mod health_handler;
pub mod record_handler;
pub mod refresh_handler;
pub mod register_handler;
