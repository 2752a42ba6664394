use std::sync::Arc;

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use termbridge::TermbridgeServer;
use termbridge_core::config::{Config, Settings};
use termbridge_core::TerminalBridge;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Config::parse_args();

    // Setup logging
    setup_logging(cli.debug);

    // Load settings
    let mut settings = Settings::load(cli.config.as_ref())?;
    settings.merge_cli(&cli);
    settings.validate();
    let settings = Arc::new(settings);

    let bridge = Arc::new(TerminalBridge::from_settings(&settings));
    let version = bridge
        .validate()
        .await
        .with_context(|| format!("Cannot use tmux binary '{}'", settings.tmux_path))?;
    info!(%version, "Starting termbridge MCP server");

    let result = serve(TermbridgeServer::new(bridge.clone(), settings)).await;
    bridge.cleanup().await;
    result
}

/// Serve MCP over stdio until the client disconnects or Ctrl-C
async fn serve(server: TermbridgeServer) -> Result<()> {
    let service = server
        .serve(stdio())
        .await
        .context("Failed to start MCP service")?;

    tokio::select! {
        res = service.waiting() => {
            res.context("MCP service task failed")?;
            info!("MCP client disconnected");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
        }
    }

    Ok(())
}

fn setup_logging(debug: bool) {
    // stdout carries the protocol, so logs go to stderr
    let filter = if debug {
        EnvFilter::new("termbridge=debug,termbridge_core=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("termbridge=info,termbridge_core=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
