pub mod auth_state;
pub mod health_state;
pub mod record_state;
pub mod token_state;
