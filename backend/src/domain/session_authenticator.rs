//! Authenticator service backed by the identity provider port.
//!
//! Provider reasons arrive as `CODE` or `CODE : detail`. Only the code is
//! matched; anything unrecognised is surfaced as an upstream failure with the
//! provider's text attached for diagnosis.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{Authenticator, IdentityProvider, IdentityProviderError};
use crate::domain::{Credentials, Error, IssuedToken};

/// Which provider call produced a rejection.
#[derive(Debug, Clone, Copy)]
enum Flow {
    SignUp,
    SignIn,
}

fn reason_code(reason: &str) -> &str {
    reason.split(" : ").next().unwrap_or(reason).trim()
}

fn map_provider_error(flow: Flow, error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::Rejected { reason } => {
            let code = reason_code(&reason).to_owned();
            match (flow, code.as_str()) {
                (Flow::SignUp, "EMAIL_EXISTS") => {
                    Error::credential_conflict("Email already exists")
                }
                (Flow::SignUp, code) if code.starts_with("WEAK_PASSWORD") => {
                    Error::weak_credential("Password is too weak")
                }
                (Flow::SignIn, "EMAIL_NOT_FOUND") => Error::unknown_identity("Unknown email"),
                (Flow::SignIn, "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS") => {
                    Error::invalid_credential("Invalid password")
                }
                _ => {
                    error!(?flow, %reason, "identity provider returned unrecognised reason");
                    Error::upstream(reason.as_str())
                        .with_details(json!({ "providerMessage": reason }))
                }
            }
        }
        IdentityProviderError::Transport { message }
        | IdentityProviderError::Decode { message } => {
            error!(?flow, %message, "identity provider call failed");
            Error::upstream(format!("identity provider unavailable: {message}"))
        }
    }
}

/// Authenticator delegating to an [`IdentityProvider`].
#[derive(Clone)]
pub struct SessionAuthenticator<P: ?Sized> {
    provider: Arc<P>,
}

impl<P: ?Sized> SessionAuthenticator<P> {
    /// Create an authenticator over `provider`.
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P> Authenticator for SessionAuthenticator<P>
where
    P: IdentityProvider + ?Sized,
{
    async fn sign_up(&self, credentials: &Credentials) -> Result<IssuedToken, Error> {
        let issued = self
            .provider
            .create_account(credentials)
            .await
            .map_err(|err| map_provider_error(Flow::SignUp, err))?;
        info!(email = credentials.email(), "account created");
        Ok(issued)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<IssuedToken, Error> {
        let issued = self
            .provider
            .sign_in(credentials)
            .await
            .map_err(|err| map_provider_error(Flow::SignIn, err))?;
        info!(email = credentials.email(), "signed in");
        Ok(issued)
    }
}

#[cfg(test)]
#[path = "session_authenticator_tests.rs"]
mod tests;
