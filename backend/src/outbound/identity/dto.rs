//! Wire types for the identity provider's account endpoints.

use serde::{Deserialize, Serialize};

/// Request body shared by `accounts:signUp` and `accounts:signInWithPassword`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PasswordRequestDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) return_secure_token: bool,
}

/// Successful token response. Other fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TokenResponseDto {
    #[serde(default)]
    pub(super) id_token: String,
    /// Lifetime in seconds, encoded as a decimal string.
    #[serde(default)]
    pub(super) expires_in: Option<String>,
}

/// Error envelope `{"error": {"code": 400, "message": "EMAIL_EXISTS"}}`.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelopeDto {
    pub(super) error: ErrorBodyDto,
}

/// Only the reason text is used; the numeric code mirrors the HTTP status.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    pub(super) message: String,
}
