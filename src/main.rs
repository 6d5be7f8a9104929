//! Crosscast - forced cross-platform broadcasts for a QQ / Minecraft bridge
//!
//! Reads inbound bridge events as JSON lines on stdin, runs them through the
//! forced-broadcast router, and delivers matches through console connectors
//! that write one JSON line per outbound event to stdout.

mod bridge;
mod common;
mod config;
mod connector;

use std::sync::Arc;

use anyhow::Result;
use futures::StreamExt;
use tokio::signal;
use tokio::task::JoinSet;
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing::{debug, error, info, info_span, warn};

use bridge::cross_broadcast::QQ_GROUP_TARGET;
use bridge::{Bridge, CrossBroadcastSystem};
use common::BroadcastInfo;
use config::{env::get_config_path, load_and_validate, Config};
use connector::{shared_sink, ConnectorManager, ConsoleConnector};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr, stdout carries outbound events)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Crosscast v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = get_config_path();
    info!("Loading configuration from {}...", config_path);

    let config = load_and_validate(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        error!("Please ensure {} is properly formatted.", config_path);
        e
    })?;

    info!("Configuration loaded successfully");
    info!("  QQ source: {}", config.connector.qq.source_name);
    info!("  Minecraft source: {}", config.connector.minecraft.source_name);
    info!(
        "  Commands: {}{} (QQ -> Minecraft), {} (Minecraft -> QQ)",
        config.bridge.command_prefix,
        config.system.cross_broadcast.mc_command,
        config.system.cross_broadcast.qq_command
    );

    let connectors = Arc::new(build_connectors(&config));
    info!("Connectors: {:?}", connectors.names());

    let bridge = Arc::new(
        Bridge::new().with_system(Box::new(CrossBroadcastSystem::new(
            &config,
            connectors.clone(),
        ))),
    );
    info!("Systems: {:?}", bridge.system_names());

    let mut tasks = JoinSet::new();
    let mut lines = FramedRead::new(tokio::io::stdin(), LinesCodec::new());
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    info!("Reading events from stdin");
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            line = lines.next() => match line {
                Some(Ok(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match parse_event(&line) {
                        Ok(event) => spawn_event(&mut tasks, Arc::clone(&bridge), event),
                        Err(e) => warn!("Skipping malformed event: {}", e),
                    }
                }
                Some(Err(e)) => {
                    error!("Failed to read stdin: {}", e);
                    break;
                }
                None => {
                    info!("Input closed");
                    break;
                }
            },
        }
    }

    // Let in-flight events finish delivering
    while tasks.join_next().await.is_some() {}

    info!("Exiting...");
    Ok(())
}

/// Register one console connector per configured platform plus the fixed QQ group,
/// all writing to the same stdout handle.
fn build_connectors(config: &Config) -> ConnectorManager {
    let manager = ConnectorManager::new();
    let stdout = shared_sink(tokio::io::stdout());
    manager.register(Arc::new(ConsoleConnector::new(
        config.connector.qq.source_name.clone(),
        config.connector.qq.enable,
        stdout.clone(),
    )));
    manager.register(Arc::new(ConsoleConnector::new(
        config.connector.minecraft.source_name.clone(),
        config.connector.minecraft.enable,
        stdout.clone(),
    )));

    let qq_target = config
        .system
        .cross_broadcast
        .qq_target
        .as_deref()
        .unwrap_or(QQ_GROUP_TARGET);
    manager.register(Arc::new(ConsoleConnector::new(
        qq_target,
        config.connector.qq.enable,
        stdout,
    )));
    manager
}

/// Parse one JSON line and attach its logging span.
fn parse_event(line: &str) -> serde_json::Result<BroadcastInfo> {
    let mut event: BroadcastInfo = serde_json::from_str(line)?;
    event.logger = info_span!(
        "event",
        source = %event.source_name(),
        sender_id = %event.sender_id
    );
    Ok(event)
}

/// Process one event on its own task.
fn spawn_event(tasks: &mut JoinSet<()>, bridge: Arc<Bridge>, event: BroadcastInfo) {
    tasks.spawn(async move {
        match bridge.process(&event).await {
            Ok(true) => debug!(source = event.source_name(), "Event routed"),
            Ok(false) => {}
            Err(e) => error!(source = event.source_name(), "Failed to route event: {}", e),
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
