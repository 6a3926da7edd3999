//! Reqwest-backed identity provider adapter.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;
use zeroize::Zeroizing;

use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{BearerToken, Credentials, IssuedToken};
use crate::outbound::ClientBuildError;
use crate::outbound::body_preview::status_message;
use crate::outbound::endpoint::append_segments;

use super::dto::{ErrorEnvelopeDto, PasswordRequestDto, TokenResponseDto};

const SIGN_UP_ACTION: &str = "accounts:signUp";
const SIGN_IN_ACTION: &str = "accounts:signInWithPassword";

/// Identity provider adapter speaking the hosted accounts REST API.
///
/// The API key travels as the `key` query parameter and is never rendered
/// by [`fmt::Debug`].
pub struct IdentityToolkitClient {
    client: Client,
    sign_up_url: Url,
    sign_in_url: Url,
    api_key: Zeroizing<String>,
}

impl IdentityToolkitClient {
    /// Build an adapter rooted at `base_url` with a per-request timeout.
    pub fn new(
        base_url: Url,
        api_key: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, ClientBuildError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            sign_up_url: append_segments(&base_url, ["v1", SIGN_UP_ACTION])?,
            sign_in_url: append_segments(&base_url, ["v1", SIGN_IN_ACTION])?,
            api_key,
        })
    }

    async fn exchange(
        &self,
        url: &Url,
        credentials: &Credentials,
    ) -> Result<IssuedToken, IdentityProviderError> {
        let body = PasswordRequestDto {
            email: credentials.email(),
            password: credentials.password(),
            return_secure_token: true,
        };
        let response = self
            .client
            .post(url.clone())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, &bytes));
        }
        decode_token(&bytes)
    }
}

impl fmt::Debug for IdentityToolkitClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityToolkitClient")
            .field("sign_up_url", &self.sign_up_url.as_str())
            .field("sign_in_url", &self.sign_in_url.as_str())
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IdentityProvider for IdentityToolkitClient {
    async fn create_account(
        &self,
        credentials: &Credentials,
    ) -> Result<IssuedToken, IdentityProviderError> {
        self.exchange(&self.sign_up_url, credentials).await
    }

    async fn sign_in(
        &self,
        credentials: &Credentials,
    ) -> Result<IssuedToken, IdentityProviderError> {
        self.exchange(&self.sign_in_url, credentials).await
    }
}

/// URLs carry the API key, so they are stripped before rendering.
fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    if error.is_timeout() {
        return IdentityProviderError::transport("request timed out");
    }
    IdentityProviderError::transport(error.without_url().to_string())
}

/// Client errors carrying the provider's error envelope become rejections;
/// everything else is a transport failure.
fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    if status.is_client_error() {
        if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelopeDto>(body) {
            return IdentityProviderError::rejected(envelope.error.message);
        }
    }
    IdentityProviderError::transport(status_message(status, body))
}

fn decode_token(body: &[u8]) -> Result<IssuedToken, IdentityProviderError> {
    let dto: TokenResponseDto = serde_json::from_slice(body)
        .map_err(|err| IdentityProviderError::decode(err.to_string()))?;
    let token = BearerToken::new(dto.id_token)
        .map_err(|_| IdentityProviderError::decode("response carried no idToken"))?;
    let expires_in = dto
        .expires_in
        .map(|raw| {
            raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                IdentityProviderError::decode(format!(
                    "expiresIn `{raw}` is not a number of seconds"
                ))
            })
        })
        .transpose()?;
    Ok(IssuedToken::new(token, expires_in))
}

#[cfg(test)]
mod tests {
    //! Unit coverage for endpoint layout and response mapping.
    use rstest::rstest;

    use super::*;

    fn client(base: &str) -> IdentityToolkitClient {
        IdentityToolkitClient::new(
            Url::parse(base).expect("base url"),
            Zeroizing::new("api-key-123".to_owned()),
            Duration::from_secs(5),
        )
        .expect("client builds")
    }

    #[rstest]
    fn endpoints_are_versioned_actions() {
        let client = client("https://identity.example.test/");
        assert_eq!(
            client.sign_up_url.as_str(),
            "https://identity.example.test/v1/accounts:signUp"
        );
        assert_eq!(
            client.sign_in_url.as_str(),
            "https://identity.example.test/v1/accounts:signInWithPassword"
        );
    }

    #[rstest]
    fn debug_output_redacts_api_key() {
        let rendered = format!("{:?}", client("https://identity.example.test/"));
        assert!(!rendered.contains("api-key-123"));
        assert!(rendered.contains("<redacted>"));
    }

    #[rstest]
    #[case::email_exists(
        StatusCode::BAD_REQUEST,
        r#"{"error":{"code":400,"message":"EMAIL_EXISTS"}}"#,
        IdentityProviderError::rejected("EMAIL_EXISTS")
    )]
    #[case::weak_password(
        StatusCode::BAD_REQUEST,
        r#"{"error":{"code":400,"message":"WEAK_PASSWORD : Password should be at least 6 characters"}}"#,
        IdentityProviderError::rejected("WEAK_PASSWORD : Password should be at least 6 characters")
    )]
    #[case::unstructured_client_error(
        StatusCode::NOT_FOUND,
        "<html>missing</html>",
        IdentityProviderError::transport("status 404: <html>missing</html>")
    )]
    #[case::server_error(
        StatusCode::SERVICE_UNAVAILABLE,
        r#"{"error":{"code":503,"message":"BACKEND_ERROR"}}"#,
        IdentityProviderError::transport(
            r#"status 503: {"error":{"code":503,"message":"BACKEND_ERROR"}}"#
        )
    )]
    fn maps_status_errors(
        #[case] status: StatusCode,
        #[case] body: &str,
        #[case] expected: IdentityProviderError,
    ) {
        assert_eq!(map_status_error(status, body.as_bytes()), expected);
    }

    #[rstest]
    fn decodes_token_with_string_lifetime() {
        let issued = decode_token(br#"{"idToken":"tok-1","expiresIn":"3600","localId":"u1"}"#)
            .expect("decode");
        assert_eq!(issued.token().as_str(), "tok-1");
        assert_eq!(issued.expires_in(), Some(Duration::from_secs(3600)));
    }

    #[rstest]
    fn missing_lifetime_is_allowed() {
        let issued = decode_token(br#"{"idToken":"tok-1"}"#).expect("decode");
        assert_eq!(issued.expires_in(), None);
    }

    #[rstest]
    #[case::blank_token(r#"{"idToken":"","expiresIn":"3600"}"#)]
    #[case::missing_token(r#"{"expiresIn":"3600"}"#)]
    #[case::bad_lifetime(r#"{"idToken":"tok-1","expiresIn":"soon"}"#)]
    #[case::not_json("ok")]
    fn malformed_token_responses_are_decode_errors(#[case] body: &str) {
        let err = decode_token(body.as_bytes()).expect_err("malformed");
        assert!(matches!(err, IdentityProviderError::Decode { .. }));
    }
}
