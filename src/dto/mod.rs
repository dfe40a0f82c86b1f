pub mod credential_dto;
pub mod listing_dto;
pub mod record_dto;
pub mod token_dto;
