pub mod credential_repository;
pub mod record_repository;
