mod aggregator;
mod config;
mod error;
mod models;
mod routes;
mod server;
mod sources;
mod state;
mod telemetry_cache;

use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use config::{CliArgs, TelemetryConfig};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = TelemetryConfig::from_args(CliArgs::parse());

    // Initialize tracing; the guard flushes the file writer on exit
    let _log_guard = init_tracing(config.log_dir.as_deref());

    info!("Starting mission-control v{}", env!("CARGO_PKG_VERSION"));
    info!("GitHub user: {}", config.identities.github_username);
    info!("LeetCode user: {}", config.identities.leetcode_username);
    info!("Medium user: {}", config.identities.medium_username);
    match config.youtube_channel() {
        Some(channel) => info!("YouTube channel: {}", channel),
        None => info!("YouTube channel: not configured, video feed disabled"),
    }

    let port = config.port;
    let refresh_in_background = config.refresh_in_background;
    let caching_enabled = config.caching_enabled();
    info!("Cache TTL: {}s", config.cache_ttl_secs);

    let state = Arc::new(AppState::new(config)?);

    if refresh_in_background {
        if caching_enabled {
            let _refresher = telemetry_cache::spawn_telemetry_refresher(state.clone());
        } else {
            warn!("--refresh-in-background ignored: caching is disabled (cache TTL is 0)");
        }
    }

    let router = server::build_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Mission control listening on http://0.0.0.0:{}", port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Mission control shutting down");
    Ok(())
}

fn init_tracing(
    log_dir: Option<&std::path::Path>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mission_control=info,tower_http=info".into());

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "mission-control.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
