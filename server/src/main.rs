use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use rtsp_scout_common::config::{Config, LISTEN_PORT};
use rtsp_scout_core::discovery::DiscoveryService;
use rtsp_scout_server::commands::CommandLine;
use rtsp_scout_server::{logging, routes};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.quiet);

    let cfg = Config::default().with_concurrency(commands.concurrency);
    let service = Arc::new(DiscoveryService::from_config(&cfg));
    let app = routes::create_router(service);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, LISTEN_PORT));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Error starting server on {addr}"))?;

    info!(
        concurrency = cfg.concurrency,
        "Starting server on :{LISTEN_PORT}..."
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server stopped unexpectedly")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
