//! Console entry point.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use garrison::commands::CommandRegistry;
use garrison::config::Config;
use garrison::gateway::LocalGateway;
use garrison::ingest::{HttpFetcher, UploadStore};
use garrison::router::{ConsoleDeps, Router};
use garrison::runtime::RuntimeBridge;

#[derive(Parser, Debug)]
#[command(name = "garrison")]
#[command(about = "Operator console for a game-session community")]
#[command(version)]
struct Args {
    /// Skip the container runtime connection (status queries degrade).
    #[arg(long)]
    no_runtime: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("garrison=info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(home = %config.gateway.home_community, "Loaded configuration");
    if config.gateway.token.is_none() {
        tracing::warn!("GATEWAY_TOKEN is not set; a platform gateway cannot authenticate");
    }

    // A startup failure to reach the runtime degrades the status command
    // instead of crashing the process.
    let runtime = if args.no_runtime {
        RuntimeBridge::degraded()
    } else {
        match RuntimeBridge::connect().await {
            Ok(bridge) => {
                tracing::info!("Connected to container runtime");
                bridge
            }
            Err(e) => {
                tracing::warn!(error = %e, "Container runtime unreachable; status queries degraded");
                RuntimeBridge::degraded()
            }
        }
    };

    let store = UploadStore::new(&config.storage);
    store.ensure_dirs().await?;

    let registry = CommandRegistry::builtin();
    tracing::info!(commands = registry.len(), "Command registry built");

    let deps = ConsoleDeps {
        home_community: config.gateway.home_community.clone(),
        runtime,
        store,
        fetcher: Arc::new(HttpFetcher::new()),
    };
    let router = Arc::new(Router::new(registry, deps));

    let gateway = LocalGateway::new(config.operator.clone(), config.gateway.home_community.clone());
    gateway.run(router).await?;

    tracing::info!("Console shutdown complete");
    Ok(())
}
