//! `banking-enc-svc` — service binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the tracing pipeline.
//! 3. Build the HTTP clients for the identity service and the record store.
//! 4. Snapshot encryption secrets into the [`KeyRing`].
//! 5. Build the Axum router and start the HTTP server.

mod auth;
mod clients;
mod config;
mod crypto;
mod keys;
mod record;
mod server;
mod telemetry;
mod workflow;

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use clients::{HttpIdentityVerifier, PostgrestRecordStore};
use config::Config;
use keys::KeyRing;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        http_port = cfg.http_port,
        "banking-enc-svc starting"
    );

    // -----------------------------------------------------------------------
    // 3. Collaborator clients
    // -----------------------------------------------------------------------
    let http = reqwest::Client::builder()
        .timeout(server::middleware::REQUEST_TIMEOUT)
        .build()?;
    let verifier = HttpIdentityVerifier::new(http.clone(), &cfg.identity_url, &cfg.service_key);
    let store = PostgrestRecordStore::new(http, &cfg.store_url, &cfg.service_key);

    // -----------------------------------------------------------------------
    // 4. Encryption keys
    // -----------------------------------------------------------------------
    let keys = KeyRing::from_env();
    if keys.is_empty() {
        warn!("no encryption keys configured; protection requests will fail until one is set");
    } else {
        info!(key_versions = keys.len(), "encryption keys loaded");
    }

    // -----------------------------------------------------------------------
    // 5. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(Arc::new(verifier), Arc::new(store), Arc::new(keys));
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.http_port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
