//! dex application library: CLI, logging setup, and server startup

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dex_api::AppState;
use dex_core::AppConfig;
use tracing_subscriber::EnvFilter;

/// Command-line options. Flags override values from `--config`.
#[derive(Debug, Parser)]
#[command(name = "dex-server", version, about = "Constant-product ETH/USDC pool over HTTP")]
pub struct Cli {
    /// JSON config file
    #[arg(long, env = "DEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long, env = "DEX_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "DEX_PORT")]
    pub port: Option<u16>,
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; the defaults keep our crates at debug.
pub fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("dex_lib=debug".parse()?)
        .add_directive("dex_api=debug".parse()?)
        .add_directive("amm=debug".parse()?)
        .add_directive("info".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))
}

/// Resolve the effective config: defaults, then file, then flags.
pub fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    if let Some(host) = &cli.host {
        config.api.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.api.port = port;
    }

    config.validate()?;
    Ok(config)
}

/// Socket address the server listens on
pub fn bind_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    let ip: IpAddr = config
        .api
        .host
        .parse()
        .with_context(|| format!("invalid listen host {:?}", config.api.host))?;
    Ok(SocketAddr::new(ip, config.api.port))
}

/// Run the server until shutdown
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let addr = bind_addr(&config)?;

    tracing::info!(
        "Seeding pool with {} ETH / {} USDC",
        config.pool.eth_balance,
        config.pool.usdc_balance
    );
    let state = AppState::with_config(config).context("initialising pool")?;

    dex_api::start_server(state, addr)
        .await
        .with_context(|| format!("serving on {}", addr))
}
