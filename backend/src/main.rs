//! Backend entry-point: loads settings, picks a store and serves the API.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use eduwarn::inbound::http::health::HealthState;
use eduwarn::inbound::http::session_config::{BuildMode, session_settings_from_env};
use eduwarn::inbound::http::state::HttpStatePorts;
use eduwarn::outbound::memory::InMemoryStore;
use eduwarn::outbound::rest::RestStoreClient;
use eduwarn::server::{ServerConfig, create_server, in_memory_ports, rest_ports};
use eduwarn::settings::AppSettings;

fn store_ports(settings: &AppSettings, clock: Arc<dyn Clock>) -> std::io::Result<HttpStatePorts> {
    let endpoint = settings.store_endpoint().map_err(std::io::Error::other)?;
    match endpoint {
        Some(endpoint) => {
            info!(store = %endpoint.base_url, "using hosted table store");
            let client = RestStoreClient::new(endpoint).map_err(std::io::Error::other)?;
            Ok(rest_ports(&client, clock))
        }
        None => {
            let admin = settings.demo_admin().map_err(std::io::Error::other)?;
            warn!(
                demo_admin = admin.is_some(),
                "no store URL configured; serving in-memory demo content"
            );
            let store = InMemoryStore::with_demo_content(clock.utc(), admin.as_ref())
                .map_err(std::io::Error::other)?;
            Ok(in_memory_ports(&store, clock))
        }
    }
}

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

    let settings =
        AppSettings::load().map_err(|error| std::io::Error::other(error.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(fingerprint = %session.key_fingerprint(), "session key loaded");

    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let ports = store_ports(&settings, clock)?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(session, bind_addr, ports),
    )?;
    info!(%bind_addr, "listening");
    server.await
}
