//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use records_backend::config::UpstreamSettings;
use records_backend::inbound::http::session_config::SessionSettings;

/// Everything needed to start the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) session_ttl: Duration,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) upstream: Option<UpstreamSettings>,
}

impl ServerConfig {
    /// Combine validated session settings with the listener address.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
            ttl,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            session_ttl: ttl,
            bind_addr,
            upstream: None,
        }
    }

    /// Talk to the remote identity provider and record store.
    ///
    /// Without this the server runs against in-memory adapters.
    #[must_use]
    pub fn with_upstream(mut self, upstream: Option<UpstreamSettings>) -> Self {
        self.upstream = upstream;
        self
    }
}
