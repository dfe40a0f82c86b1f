pub mod auth;
pub mod health;
pub mod records;
pub mod root;
