#![forbid(unsafe_code)]

//! The history-API node: loads configuration, wires the store client into
//! the gateway, and serves until interrupted.

use anyhow::{Context, Result};
use chronicle_store::client::HttpSearchStore;
use chronicle_types::config::NodeConfig;
use clap::Parser;
use std::{fs, path::PathBuf, sync::Arc, time::Duration};
use tokio::sync::watch;

#[derive(Parser, Debug)]
#[clap(name = "chronicled", about = "Chronicle history API node")]
struct Opts {
    /// Path to the TOML configuration file.
    #[clap(long, default_value = "chronicle.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    chronicle_telemetry::init::init_tracing()?;

    let opts = Opts::parse();
    let raw = fs::read_to_string(&opts.config)
        .with_context(|| format!("reading config file {}", opts.config.display()))?;
    let config: NodeConfig = toml::from_str(&raw)
        .with_context(|| format!("parsing config file {}", opts.config.display()))?;

    let store = HttpSearchStore::new(
        &config.store.url,
        Duration::from_secs(config.store.timeout_secs),
    )
    .context("building store client")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(target: "node", error = %e, "failed to install ctrl-c handler");
        }
        let _ = shutdown_tx.send(true);
    });

    tracing::info!(
        target: "node",
        chain = %config.chain,
        store = %config.store.url,
        "starting history gateway"
    );
    chronicle_gateway::run_server(
        config.gateway,
        config.chain,
        Arc::new(store),
        shutdown_rx,
    )
    .await
}
