use crate::entity::credential::Profile;
use crate::service::password_service::MAX_PASSWORD_BYTES;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use validator::{Validate, ValidationError};

/// bcrypt's limit is in bytes, so a `length` rule (which counts characters)
/// is not enough.
fn password_fits_bcrypt(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("length").with_message(Cow::Owned(format!(
            "Password must not exceed {MAX_PASSWORD_BYTES} bytes"
        ))));
    }
    Ok(())
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginDto {
    #[validate(length(min = 1, max = 254, message = "Identity must be between 1 and 254 characters"))]
    pub identity: String,
    #[validate(
        length(min = 1, message = "Password is required"),
        custom(function = "password_fits_bcrypt")
    )]
    pub password: String,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RegisterDto {
    #[validate(length(min = 1, max = 254, message = "Identity must be between 1 and 254 characters"))]
    pub identity: String,
    #[validate(
        length(min = 1, message = "Password is required"),
        custom(function = "password_fits_bcrypt")
    )]
    pub password: String,
    #[validate(length(max = 200, message = "Full name must not exceed 200 characters"))]
    pub full_name: Option<String>,
    #[validate(range(min = 1, message = "Company id must be positive"))]
    pub company_id: Option<i64>,
    #[validate(length(max = 100, message = "Post must not exceed 100 characters"))]
    pub post: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl RegisterDto {
    pub fn profile(&self) -> Profile {
        Profile {
            full_name: self.full_name.clone(),
            company_id: self.company_id,
            post: self.post.clone(),
            date_of_birth: self.date_of_birth,
        }
    }
}

impl fmt::Debug for LoginDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginDto")
            .field("identity", &self.identity)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Debug for RegisterDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterDto")
            .field("identity", &self.identity)
            .field("password", &"[REDACTED]")
            .field("company_id", &self.company_id)
            .finish_non_exhaustive()
    }
}
