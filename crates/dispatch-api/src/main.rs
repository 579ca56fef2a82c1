//! # Drone Dispatch API Server
//!
//! Binary entry point for the dispatch controller service.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dispatch_api::{Config, build_router, seed};
use dispatch_fleet::{FleetRegistry, run_battery_reporter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        version = dispatch_api::VERSION,
        "Starting Drone Dispatch API"
    );

    // Build fleet state
    let registry = Arc::new(FleetRegistry::new());

    if config.seed_demo_fleet {
        match seed::seed_demo_fleet(&registry) {
            Ok(()) => tracing::info!(drones = registry.len(), "demo fleet preloaded"),
            Err(err) => tracing::warn!(error = %err, "demo fleet preload failed"),
        }
    }

    // Start periodic battery reporting
    let period = Duration::from_secs(config.battery_report_interval_min * 60);
    tracing::info!(
        interval_min = config.battery_report_interval_min,
        "Starting battery reporter"
    );
    tokio::spawn(run_battery_reporter(Arc::clone(&registry), period));

    // Build router
    let app = build_router(registry);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api_port));
    tracing::info!(%addr, base_url = %config.base_url, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
