//! Upstream and listener settings loaded via OrthoConfig.
//!
//! Values come from `RECORDS_*` environment variables or matching CLI flags.
//! When no upstream setting is present the server runs against the in-memory
//! adapters; setting any of them selects remote mode, which must then be
//! complete.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Raw settings as supplied by the environment or command line.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECORDS")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Base URL of the identity provider REST API.
    pub identity_url: Option<String>,
    /// API key appended to identity provider requests.
    pub identity_api_key: Option<String>,
    /// Base URL of the hierarchical record store.
    pub store_url: Option<String>,
    /// Timeout applied to every upstream request, in seconds.
    pub request_timeout_secs: Option<u64>,
}

/// Errors raised while validating [`AppSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The bind address does not parse.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    /// An upstream URL does not parse.
    #[error("invalid {field} {value:?}: {source}")]
    Url {
        field: &'static str,
        value: String,
        source: url::ParseError,
    },
    /// Remote mode was requested without a store URL.
    #[error("remote mode requires RECORDS_STORE_URL")]
    MissingStoreUrl,
    /// Remote mode was requested without an API key.
    #[error("remote mode requires RECORDS_IDENTITY_API_KEY")]
    MissingApiKey,
    /// The request timeout is zero.
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Settings for the remote identity provider and record store.
#[derive(Clone)]
pub struct UpstreamSettings {
    /// Base URL of the identity provider.
    pub identity_url: Url,
    /// API key sent with identity requests.
    pub identity_api_key: Zeroizing<String>,
    /// Base URL of the record store.
    pub store_url: Url,
    /// Timeout for every upstream request.
    pub request_timeout: Duration,
}

impl fmt::Debug for UpstreamSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamSettings")
            .field("identity_url", &self.identity_url.as_str())
            .field("identity_api_key", &"<redacted>")
            .field("store_url", &self.store_url.as_str())
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|source| SettingsError::Url {
        field,
        value: value.to_owned(),
        source,
    })
}

impl AppSettings {
    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Upstream settings, or `None` when no upstream setting is present.
    ///
    /// A partial configuration is an error rather than a silent fallback to
    /// the in-memory adapters.
    pub fn upstream(&self) -> Result<Option<UpstreamSettings>, SettingsError> {
        let remote_requested = [&self.identity_url, &self.identity_api_key, &self.store_url]
            .into_iter()
            .any(Option::is_some);
        if !remote_requested {
            return Ok(None);
        }
        let store_url = self
            .store_url
            .as_deref()
            .ok_or(SettingsError::MissingStoreUrl)?;
        let api_key = self
            .identity_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(SettingsError::MissingApiKey)?;
        let timeout_secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(SettingsError::ZeroTimeout);
        }
        Ok(Some(UpstreamSettings {
            identity_url: parse_url(
                "identity URL",
                self.identity_url.as_deref().unwrap_or(DEFAULT_IDENTITY_URL),
            )?,
            identity_api_key: Zeroizing::new(api_key.to_owned()),
            store_url: parse_url("store URL", store_url)?,
            request_timeout: Duration::from_secs(timeout_secs),
        }))
    }
}
