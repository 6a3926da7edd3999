//! Builders wiring domain services to outbound adapters.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use records_backend::config::UpstreamSettings;
use records_backend::domain::ports::{
    IdentityProvider, InMemoryIdentityProvider, InMemoryRecordStore, RecordStore,
};
use records_backend::domain::{EntityDirectoryService, SessionAuthenticator};
use records_backend::inbound::http::state::HttpState;
use records_backend::outbound::identity::IdentityToolkitClient;
use records_backend::outbound::store::RealtimeDatabaseClient;

use super::ServerConfig;

/// Build handler state, using HTTP adapters when an upstream is configured
/// and in-memory fixtures otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let (provider, store) = match &config.upstream {
        Some(upstream) => http_adapters(upstream)?,
        None => {
            warn!("no upstream configured; using in-memory adapters (dev only)");
            in_memory_adapters()
        }
    };
    let authenticator = Arc::new(SessionAuthenticator::new(provider));
    let directory = Arc::new(EntityDirectoryService::new(store));
    Ok(web::Data::new(HttpState::new(authenticator, directory)))
}

type Adapters = (Arc<dyn IdentityProvider>, Arc<dyn RecordStore>);

fn http_adapters(upstream: &UpstreamSettings) -> std::io::Result<Adapters> {
    let provider = IdentityToolkitClient::new(
        upstream.identity_url.clone(),
        upstream.identity_api_key.clone(),
        upstream.request_timeout,
    )
    .map_err(|err| std::io::Error::other(format!("identity client: {err}")))?;
    let store = RealtimeDatabaseClient::new(upstream.store_url.clone(), upstream.request_timeout)
        .map_err(|err| std::io::Error::other(format!("record store client: {err}")))?;
    info!(
        identity_url = %upstream.identity_url,
        store_url = %upstream.store_url,
        timeout_secs = upstream.request_timeout.as_secs(),
        "using remote identity provider and record store"
    );
    Ok((Arc::new(provider), Arc::new(store)))
}

fn in_memory_adapters() -> Adapters {
    (
        Arc::new(InMemoryIdentityProvider::default()),
        Arc::new(InMemoryRecordStore::default()),
    )
}
