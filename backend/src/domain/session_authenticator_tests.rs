//! Tests for the session authenticator.

use std::sync::Arc;
use std::time::Duration;

use rstest::rstest;

use super::*;
use crate::domain::ports::MockIdentityProvider;
use crate::domain::{BearerToken, ErrorCode};

fn creds() -> Credentials {
    Credentials::try_from_parts("admin@college.edu", "hunter22").expect("credentials shape")
}

fn issued() -> IssuedToken {
    IssuedToken::new(
        BearerToken::new("id-token").expect("token"),
        Some(Duration::from_secs(3600)),
    )
}

fn rejecting_sign_up(reason: &'static str) -> SessionAuthenticator<MockIdentityProvider> {
    let mut provider = MockIdentityProvider::new();
    provider
        .expect_create_account()
        .times(1)
        .return_once(move |_| Err(IdentityProviderError::rejected(reason)));
    SessionAuthenticator::new(Arc::new(provider))
}

fn rejecting_sign_in(reason: &'static str) -> SessionAuthenticator<MockIdentityProvider> {
    let mut provider = MockIdentityProvider::new();
    provider
        .expect_sign_in()
        .times(1)
        .return_once(move |_| Err(IdentityProviderError::rejected(reason)));
    SessionAuthenticator::new(Arc::new(provider))
}

#[tokio::test]
async fn sign_up_returns_provider_token() {
    let mut provider = MockIdentityProvider::new();
    provider
        .expect_create_account()
        .withf(|c| c.email() == "admin@college.edu" && c.password() == "hunter22")
        .times(1)
        .return_once(|_| Ok(issued()));
    let service = SessionAuthenticator::new(Arc::new(provider));

    let token = service.sign_up(&creds()).await.expect("sign-up succeeds");
    assert_eq!(token.token().as_str(), "id-token");
}

#[rstest]
#[case("EMAIL_EXISTS", ErrorCode::CredentialConflict, "Email already exists")]
#[case(
    "WEAK_PASSWORD : Password should be at least 6 characters",
    ErrorCode::WeakCredential,
    "Password is too weak"
)]
#[tokio::test]
async fn sign_up_maps_known_reasons(
    #[case] reason: &'static str,
    #[case] code: ErrorCode,
    #[case] message: &str,
) {
    let err = rejecting_sign_up(reason)
        .sign_up(&creds())
        .await
        .expect_err("rejected");
    assert_eq!(err.code(), code);
    assert_eq!(err.message(), message);
}

#[rstest]
#[case("EMAIL_NOT_FOUND", ErrorCode::UnknownIdentity)]
#[case("INVALID_PASSWORD", ErrorCode::InvalidCredential)]
#[case("INVALID_LOGIN_CREDENTIALS", ErrorCode::InvalidCredential)]
#[tokio::test]
async fn sign_in_maps_known_reasons(#[case] reason: &'static str, #[case] code: ErrorCode) {
    let err = rejecting_sign_in(reason)
        .sign_in(&creds())
        .await
        .expect_err("rejected");
    assert_eq!(err.code(), code);
}

#[tokio::test]
async fn unknown_reason_surfaces_provider_text() {
    let err = rejecting_sign_in("USER_DISABLED : The user account has been disabled.")
        .sign_in(&creds())
        .await
        .expect_err("rejected");
    assert_eq!(err.code(), ErrorCode::UpstreamError);
    assert_eq!(
        err.message(),
        "USER_DISABLED : The user account has been disabled."
    );
    assert_eq!(
        err.details().and_then(|d| d.get("providerMessage")),
        Some(&serde_json::json!(
            "USER_DISABLED : The user account has been disabled."
        ))
    );
}

#[tokio::test]
async fn sign_up_reason_is_not_matched_during_sign_in() {
    let err = rejecting_sign_in("EMAIL_EXISTS")
        .sign_in(&creds())
        .await
        .expect_err("rejected");
    assert_eq!(err.code(), ErrorCode::UpstreamError);
}

#[tokio::test]
async fn transport_failure_is_upstream() {
    let mut provider = MockIdentityProvider::new();
    provider
        .expect_sign_in()
        .times(1)
        .return_once(|_| Err(IdentityProviderError::transport("connection refused")));
    let service = SessionAuthenticator::new(Arc::new(provider));

    let err = service.sign_in(&creds()).await.expect_err("unreachable");
    assert_eq!(err.code(), ErrorCode::UpstreamError);
    assert!(err.message().contains("connection refused"));
}
