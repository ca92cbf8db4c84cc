//! Salat Board server.
//!
//! Loads configuration and the credential file, wires every crate together
//! and serves the page and the JSON API until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use salat_auth::CredentialStore;
use salat_core::config::AppConfig;
use salat_core::error::AppError;
use salat_core::traits::SystemClock;

/// Command line options. Everything else comes from the config files.
#[derive(Debug, Parser)]
#[command(name = "salat-server", version, about = "Prayer times board")]
struct Args {
    /// Single config file to use instead of `config/default` plus overlay.
    #[arg(long, env = "SALAT_CONFIG")]
    config: Option<String>,

    /// Overlay name, loads `config/{env}.toml` on top of the defaults.
    #[arg(long, env = "SALAT_ENV", default_value = "development")]
    env: String,

    /// Credential file, overriding `auth.credentials_path`.
    #[arg(long)]
    credentials: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut config = match load_configuration(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    if let Some(path) = args.credentials {
        config.auth.credentials_path = path;
    }

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server stopped with an error");
        std::process::exit(1);
    }
}

fn load_configuration(args: &Args) -> Result<AppConfig, AppError> {
    match &args.config {
        Some(path) => AppConfig::load_file(path),
        None => AppConfig::load(&args.env),
    }
}

fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Salat Board");

    let credentials = CredentialStore::load(&config.auth.credentials_path)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = salat_api::build_state(config, credentials, Arc::new(SystemClock))?;
    let app = salat_api::build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!(%addr, "Listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut server = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        })
        .await
    });

    tokio::select! {
        _ = shutdown_signal() => {}
        joined = &mut server => {
            return match joined {
                Ok(result) => result.map_err(|e| AppError::internal(format!("Server error: {e}"))),
                Err(e) => Err(AppError::internal(format!("Server task failed: {e}"))),
            };
        }
    }
    tracing::info!(grace_seconds = grace.as_secs(), "Shutdown signal received, draining connections");
    let _ = shutdown_tx.send(true);

    match tokio::time::timeout(grace, server).await {
        Ok(Ok(result)) => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        Ok(Err(e)) => return Err(AppError::internal(format!("Server task failed: {e}"))),
        Err(_) => tracing::warn!("Graceful shutdown timed out, dropping open connections"),
    }

    tracing::info!("Salat Board shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
}
