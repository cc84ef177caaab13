//! 'main' for the explorer genesis uploader process

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use config::{Config, Environment, File};
use tracing::{error, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use explorer_genesis_common::source::SnapshotSource;
use explorer_genesis_module_pg_store::configuration::DatabaseConfig;
use explorer_genesis_module_pg_store::PgStore;
use explorer_genesis_module_snapshot_fetcher::configuration::SnapshotConfig;
use explorer_genesis_module_snapshot_fetcher::{FileSource, HttpSource};
use explorer_genesis_module_uploader::{GenesisUploader, UploaderConfig};

#[derive(Parser, Debug)]
#[command(name = "genesis-uploader")]
#[command(about = "Uploads a genesis snapshot into an empty explorer database")]
struct Args {
    /// Configuration file name (without extension)
    #[arg(short, long, default_value = "uploader")]
    config: String,

    /// Read the snapshot from a local JSON file instead of the node
    #[arg(short, long)]
    file: Option<String>,
}

#[tokio::main]
pub async fn main() -> Result<()> {
    let fmt_layer = fmt::layer().with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );
    Registry::default().with(fmt_layer).init();

    let args = Args::parse();
    info!("Explorer genesis uploader process");

    let config = Config::builder()
        .add_source(File::with_name(&args.config).required(false))
        .add_source(Environment::with_prefix("GENESIS_UPLOADER").separator("__"))
        .build()?;

    let database = DatabaseConfig::try_load(&config)?;
    let uploader_config = UploaderConfig::try_load(&config)?;

    let source: Arc<dyn SnapshotSource> = match &args.file {
        Some(path) => Arc::new(FileSource::new(path.clone())),
        None => {
            let snapshot = SnapshotConfig::try_load(&config)?;
            Arc::new(HttpSource::new(&snapshot)?)
        }
    };

    let store = Arc::new(PgStore::connect(&database).await?);
    let uploader = GenesisUploader::new(source, store, uploader_config);

    match uploader.run().await {
        Ok(report) => {
            info!(
                initial_height = report.initial_height,
                addresses = report.addresses.inserted,
                coins = report.coins.inserted,
                validators = report.validators.inserted,
                balances = report.balances.inserted,
                stakes = report.stakes.inserted,
                unbonds = report.unbonds.inserted,
                liquidity_pools = report.liquidity_pools.inserted,
                orders = report.orders.inserted,
                "upload complete"
            );
            Ok(())
        }
        Err(e) => {
            error!("upload failed: {e}");
            Err(e.into())
        }
    }
}
