//! Relay entry-point: loads settings, initialises tracing, and runs the server.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use engage_relay::inbound::http::health::HealthState;
use engage_relay::server::{ServerConfig, create_server};
use engage_relay::settings::ServerSettings;

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

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let vendor_base = settings.vendor_base().map_err(std::io::Error::other)?;
    let config = ServerConfig::new(bind_addr, settings.public_dir()).with_vendor_base(vendor_base);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(
        addr = %bind_addr,
        public_dir = %settings.public_dir().display(),
        "relay listening"
    );
    server.await
}
