//! Port for the external identity provider that owns user accounts.
//!
//! The provider turns an email/password pair into a bearer token. Rejections
//! carry the provider's raw reason text (for example `EMAIL_EXISTS` or
//! `WEAK_PASSWORD : Password should be at least 6 characters`); the
//! authenticator decides what each reason means to callers.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::{BearerToken, Credentials, IssuedToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The provider answered and refused the request.
        Rejected { reason: String } => "identity provider rejected request: {reason}",
        /// The provider could not be reached or answered unexpectedly.
        Transport { message: String } => "identity provider unreachable: {message}",
        /// The provider answered with a body that could not be decoded.
        Decode { message: String } => "identity provider response malformed: {message}",
    }
}

/// Account operations offered by the identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and return a token for it.
    async fn create_account(
        &self,
        credentials: &Credentials,
    ) -> Result<IssuedToken, IdentityProviderError>;

    /// Sign in to an existing account.
    async fn sign_in(&self, credentials: &Credentials)
    -> Result<IssuedToken, IdentityProviderError>;
}

/// Minimum password length enforced by the in-memory provider.
const MIN_PASSWORD_LEN: usize = 6;

/// Token lifetime reported by the in-memory provider.
const FIXTURE_TOKEN_TTL: Duration = Duration::from_secs(3600);

type AccountTable = HashMap<String, Zeroizing<String>>;

/// In-memory identity provider used when no remote endpoint is configured.
///
/// Reproduces the reason codes of the hosted provider so that the
/// authenticator's mapping is exercised end to end in local runs.
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    accounts: Mutex<AccountTable>,
}

impl InMemoryIdentityProvider {
    fn issue() -> Result<IssuedToken, IdentityProviderError> {
        let token = BearerToken::new(format!("fixture-{}", Uuid::new_v4()))
            .map_err(|err| IdentityProviderError::decode(err.to_string()))?;
        Ok(IssuedToken::new(token, Some(FIXTURE_TOKEN_TTL)))
    }

    fn accounts(&self) -> Result<MutexGuard<'_, AccountTable>, IdentityProviderError> {
        self.accounts
            .lock()
            .map_err(|_| IdentityProviderError::transport("account table lock poisoned"))
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn create_account(
        &self,
        credentials: &Credentials,
    ) -> Result<IssuedToken, IdentityProviderError> {
        let mut accounts = self.accounts()?;
        if accounts.contains_key(credentials.email()) {
            return Err(IdentityProviderError::rejected("EMAIL_EXISTS"));
        }
        if credentials.password().chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityProviderError::rejected(
                "WEAK_PASSWORD : Password should be at least 6 characters",
            ));
        }
        accounts.insert(
            credentials.email().to_owned(),
            Zeroizing::new(credentials.password().to_owned()),
        );
        Self::issue()
    }

    async fn sign_in(
        &self,
        credentials: &Credentials,
    ) -> Result<IssuedToken, IdentityProviderError> {
        let accounts = self.accounts()?;
        match accounts.get(credentials.email()) {
            None => Err(IdentityProviderError::rejected("EMAIL_NOT_FOUND")),
            Some(stored) if stored.as_str() != credentials.password() => {
                Err(IdentityProviderError::rejected("INVALID_PASSWORD"))
            }
            Some(_) => Self::issue(),
        }
    }
}
