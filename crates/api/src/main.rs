//! `users-api` — API binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Build the [`UserCipher`] from the two configured field keys.
//! 4. Open the record store and run migrations.
//! 5. Build the Axum router and serve until Ctrl-C / SIGTERM.

mod config;
mod crypto;
mod server;
mod store;
mod telemetry;

use anyhow::{Context, Result};
use tracing::info;

use config::Config;
use crypto::UserCipher;
use server::state::AppState;
use store::UserStore;

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
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.port,
        "users-api starting"
    );

    // -----------------------------------------------------------------------
    // 3. Encryption boundary
    // -----------------------------------------------------------------------
    let cipher = UserCipher::new(&cfg.user_encryption_key, &cfg.password_encryption_key)
        .context("failed to initialise field encryption keys")?;

    // -----------------------------------------------------------------------
    // 4. Record store
    // -----------------------------------------------------------------------
    let store = UserStore::connect(&cfg.database_url, cfg.database_max_connections)
        .await
        .context("failed to open record store")?;
    info!("record store ready");

    // -----------------------------------------------------------------------
    // 5. HTTP server
    // -----------------------------------------------------------------------
    let cors = server::middleware::cors(cfg.allowed_origin_header()?);
    let router = server::router::build(AppState::new(store.clone(), cipher), cors);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("users-api stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
