use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaimsDto {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String, // unique per token, so two pairs minted in the same second still differ
    pub iss: String,
    pub typ: TokenKind,
    #[serde(default)]
    pub adm: bool,
}

/// Access token plus the single-use refresh token that can replace it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: i64,
    pub refresh_expires_at: i64,
    pub is_admin: bool,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("access_expires_at", &self.access_expires_at)
            .field("refresh_expires_at", &self.refresh_expires_at)
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequestDto {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LogoutRequestDto {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogoutResponseDto {
    pub message: String,
}
