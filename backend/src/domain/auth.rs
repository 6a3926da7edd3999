//! Authentication primitives: submitted credentials and issued bearer tokens.
//!
//! Inbound adapters build these from raw request strings so that the
//! authenticator and the identity provider port only ever see validated
//! values. Secret material is zeroized on drop and redacted from `Debug`.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use zeroize::Zeroizing;

/// Validation errors raised while building [`Credentials`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    #[error("EMAIL must not be empty")]
    EmptyEmail,
    /// Password was empty.
    #[error("PASSWORD must not be empty")]
    EmptyPassword,
}

/// Email/password pair submitted to sign up or sign in.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim.
///
/// # Examples
/// ```
/// use records_backend::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(" admin@college.edu ", "hunter22").unwrap();
/// assert_eq!(creds.email(), "admin@college.edu");
/// assert_eq!(creds.password(), "hunter22");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Validate raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email identifying the account.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password as submitted.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Error returned when a bearer token is blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("bearer token must not be empty")]
pub struct EmptyTokenError;

/// Opaque credential issued by the identity provider and presented to the
/// record store. Never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Wrap a raw token, rejecting blank values.
    pub fn new(raw: impl Into<String>) -> Result<Self, EmptyTokenError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(EmptyTokenError);
        }
        Ok(Self(Zeroizing::new(raw)))
    }

    /// Borrow the raw token for transmission.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Token returned by a successful sign-up or sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    token: BearerToken,
    expires_in: Option<Duration>,
}

impl IssuedToken {
    /// Pair a token with its advertised lifetime.
    pub fn new(token: BearerToken, expires_in: Option<Duration>) -> Self {
        Self { token, expires_in }
    }

    /// Bearer credential.
    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    /// Lifetime reported by the provider, when it reports one.
    pub fn expires_in(&self) -> Option<Duration> {
        self.expires_in
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsValidationError::EmptyEmail)]
    #[case("   ", "pw", CredentialsValidationError::EmptyEmail)]
    #[case("a@b.edu", "", CredentialsValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = Credentials::try_from_parts(email, password).expect_err("invalid input");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn password_whitespace_is_preserved() {
        let creds = Credentials::try_from_parts("a@b.edu", "  spaced  ").expect("valid");
        assert_eq!(creds.password(), "  spaced  ");
    }

    #[rstest]
    fn debug_output_redacts_secrets() {
        let creds = Credentials::try_from_parts("a@b.edu", "topsecret").expect("valid");
        let token = BearerToken::new("eyJhbGciOi").expect("valid");
        assert!(!format!("{creds:?}").contains("topsecret"));
        assert!(!format!("{token:?}").contains("eyJhbGciOi"));
    }

    #[rstest]
    #[case("")]
    #[case("  ")]
    fn blank_tokens_are_rejected(#[case] raw: &str) {
        assert_eq!(BearerToken::new(raw), Err(EmptyTokenError));
    }
}
