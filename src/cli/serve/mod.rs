//! Serve command - runs the HTTP API

use std::net::SocketAddr;

use anyhow::Context;
use clap::Args;
use tokio::net::{lookup_host, TcpListener};
use tokio::signal;
use tracing::info;

use crate::api::create_router;
use crate::config::AppConfig;
use crate::infrastructure::logging;

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Address to bind, overrides server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind, overrides server.port
    #[arg(long)]
    pub port: Option<u16>,
}

/// Run the API server until Ctrl+C or SIGTERM
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?.with_server_overrides(args.host, args.port);
    logging::init_logging(&config.logging)?;

    let state = crate::create_app_state(&config)?;
    let app = create_router(state);

    let addr = resolve_socket_addr(&config).await?;
    let listener = TcpListener::bind(addr).await?;
    info!("Employee directory listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

/// Accepts IP literals and host names such as `localhost`
async fn resolve_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    let host = config.server.host.as_str();

    lookup_host((host, config.server.port))
        .await
        .with_context(|| format!("failed to resolve server.host '{}'", host))?
        .next()
        .ok_or_else(|| anyhow::anyhow!("server.host '{}' resolved to no address", host))
}
