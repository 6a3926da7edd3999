//! Backend entry-point: loads configuration, wires adapters, and serves HTTP.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use records_backend::config::AppSettings;
use records_backend::inbound::http::health::HealthState;
use records_backend::inbound::http::session_config::fingerprint::key_fingerprint;
use records_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("configuration: {err}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let upstream = settings.upstream().map_err(std::io::Error::other)?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        ttl_secs = session.ttl.as_secs(),
        "session key loaded"
    );

    let config = ServerConfig::new(session, bind_addr).with_upstream(upstream);
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
