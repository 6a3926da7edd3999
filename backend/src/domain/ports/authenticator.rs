//! Driving port for sign-up and sign-in use-cases.
//!
//! Inbound adapters call this port with validated [`Credentials`] and store
//! the returned token in the caller's session. Errors are already mapped to
//! domain codes, so adapters never see provider-specific reasons.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, IssuedToken};

/// Domain use-case port for account authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Create an account and return a token for it.
    async fn sign_up(&self, credentials: &Credentials) -> Result<IssuedToken, Error>;

    /// Verify credentials against an existing account.
    async fn sign_in(&self, credentials: &Credentials) -> Result<IssuedToken, Error>;
}
