use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,
    #[error("Record already exists")]
    Duplicate,
    #[error("Referenced record does not exist: {0}")]
    MissingReference(String),
    #[error("Stored value changed concurrently")]
    Conflict,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Maps driver errors onto the store taxonomy. Constraint violations keep
    /// their meaning; everything else stays opaque.
    pub fn from_sqlx(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => StoreError::Duplicate,
            sqlx::Error::Database(db_error) if db_error.is_foreign_key_violation() => {
                StoreError::MissingReference(db_error.constraint().unwrap_or("foreign key").to_string())
            }
            _ => StoreError::Database(error),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::NotFound => StatusCode::NOT_FOUND,
            StoreError::Duplicate | StoreError::Conflict => StatusCode::CONFLICT,
            StoreError::MissingReference(_) => StatusCode::BAD_REQUEST,
            StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound => "NOT_FOUND",
            StoreError::Duplicate => "DUPLICATE",
            StoreError::Conflict => "CONFLICT",
            StoreError::MissingReference(_) => "VALIDATION_ERROR",
            StoreError::Database(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let message = match &self {
            StoreError::Database(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        ErrorResponse::new(self.status_code(), self.code(), message).into_response()
    }
}
