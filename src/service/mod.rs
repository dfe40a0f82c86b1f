pub mod admin_session;
pub mod auth_service;
pub mod password_service;
pub mod query_builder;
pub mod refresh_token_service;
pub mod token_service;
