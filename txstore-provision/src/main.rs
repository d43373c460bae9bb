#[macro_use]
extern crate tracing;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;

use txstore_lib::config::{find_config_file, Config};
use txstore_lib::provisioner::{ProvisionOptions, Provisioner};

const SERVICE_NAME: &str = "txstore-provision";

#[derive(Parser, Debug)]
#[command(name = "txstore-provision")]
#[command(about = "Creates the transactions collection, its indexes and demo data")]
struct Cli {
    /// Configuration file. Defaults to config.toml, then environment variables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Delete existing transactions before seeding.
    #[arg(long, default_value_t = false)]
    reset: bool,

    /// Only ensure the collection and indexes.
    #[arg(long, default_value_t = false, conflicts_with = "reset")]
    schema_only: bool,
}

fn load_config(cli: &Cli) -> Result<Config, anyhow::Error> {
    if let Some(path) = &cli.config {
        return Config::from_file(path);
    }
    match find_config_file() {
        Some(path) => {
            info!(path = %path.display(), "Using config file");
            Config::from_file(&path)
        }
        None => {
            info!("No config file found, using environment");
            Config::from_env()
        }
    }
}

#[actix_rt::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    let subscriber = registry::Registry::default()
        .with(LevelFilter::INFO)
        .with(tracing_subscriber::fmt::Layer::default());
    let tracing_guard = tracing::subscriber::set_default(subscriber);
    info!("tracing initialized");

    let config = load_config(&cli)?;

    let telemetry_layer = match &config.telemetry {
        Some(telemetry) => Some(txstore_lib::tracing::create_opentelemetry_layer(
            SERVICE_NAME,
            telemetry,
        )?),
        None => None,
    };

    let subscriber = registry::Registry::default()
        .with(LevelFilter::INFO)
        .with(tracing_subscriber::fmt::Layer::default())
        .with(telemetry_layer);
    tracing::subscriber::set_global_default(subscriber)
        .context("Unable to set up tracing subscriber")?;
    drop(tracing_guard);

    info!(
        database = %config.database,
        collection = %config.collection,
        "Provisioning"
    );
    let store = txstore_repo::mongo_store::create_store(
        &config.mongodb_url,
        &config.database,
        &config.collection,
        config.connect_timeout(),
    )
    .await
    .context("Unable to create database client")?;

    let options = ProvisionOptions {
        reset: cli.reset,
        seed: !cli.schema_only,
    };
    let result = Provisioner::new(store).with_options(options).run().await;

    if config.telemetry.is_some() {
        txstore_lib::tracing::shutdown_telemetry();
    }

    match result {
        Ok(report) => {
            info!("Database initialization completed");
            println!("{}", report);
            Ok(())
        }
        Err(err) => {
            error!(%err, "Provisioning failed");
            Err(err.into())
        }
    }
}
