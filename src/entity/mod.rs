pub mod caller;
pub mod checkpoint;
pub mod company;
pub mod credential;
pub mod document;
pub mod employee;
pub mod info_card;
pub mod record;
