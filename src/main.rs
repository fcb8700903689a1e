use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::{error, info};

use beginner_coder_api::{
    config::Config,
    create_router,
    db::{Database, DatabaseProbe, NullProbe},
    middleware::init_tracing,
    state::{AppState, DEFAULT_PROBE_TIMEOUT},
};

#[tokio::main]
async fn main() {
    // Initialize structured logging
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize tracing: {}", e);
        std::process::exit(1);
    }

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // The database is optional; without one the diagnostics endpoint says so
    let probe: Arc<dyn DatabaseProbe> = match config.database {
        Some(ref database) => Arc::new(Database::connect_or_uninitialized(database)),
        None => Arc::new(NullProbe),
    };
    let probe_timeout = config
        .database
        .as_ref()
        .map_or(DEFAULT_PROBE_TIMEOUT, |database| database.connection_timeout);
    info!("Database collaborator: {}", probe.describe());

    let state = AppState::new(probe, config.env_presence).with_probe_timeout(probe_timeout);
    info!("Serving {} languages", state.catalog.len());

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            info!("Server listening on {}", addr);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Start the server with graceful shutdown handling
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Graceful shutdown signal handler
/// Listens for SIGTERM and SIGINT signals
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, initiating graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, initiating graceful shutdown");
        },
    }
}
