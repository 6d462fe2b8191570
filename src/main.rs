use anyhow::Context;
use clap::Parser;
use crisis_actions::config::AppConfig;
use crisis_actions::server;
use crisis_actions::ActionRegistry;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crisis-reporting action server.
#[derive(Debug, Parser)]
#[command(name = "crisis-actions", version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "CRISIS_ACTIONS_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind (overrides config)
    #[arg(short, long, env = "CRISIS_ACTIONS_BIND")]
    bind: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long, env = "CRISIS_ACTIONS_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging/tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,crisis_actions=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    tracing::info!("Crisis action server booting...");

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let registry = ActionRegistry::from_config(&config)?;
    tracing::info!(actions = ?registry.names(), "Actions registered");

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port)
        .parse::<SocketAddr>()
        .with_context(|| format!("Invalid bind address '{}'", config.server.bind))?;

    server::serve(Arc::new(registry), addr).await
}
