use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

pub const DEFAULT_MONGODB_URL: &str = "mongodb://mongodb:27017/transactions_db";
pub const DEFAULT_DATABASE: &str = "transactions_db";
pub const DEFAULT_COLLECTION: &str = "transactions";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// OTLP trace export, e.g. to Honeycomb.
#[derive(Deserialize, Clone, PartialEq, Debug)]
pub struct TelemetryConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

#[derive(Deserialize, Clone, PartialEq, Debug)]
pub struct Config {
    #[serde(default = "default_mongodb_url")]
    pub mongodb_url: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    pub telemetry: Option<TelemetryConfig>,
}

fn default_mongodb_url() -> String {
    DEFAULT_MONGODB_URL.to_owned()
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_owned()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_owned()
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mongodb_url: default_mongodb_url(),
            database: default_database(),
            collection: default_collection(),
            connect_timeout_secs: default_connect_timeout_secs(),
            telemetry: None,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config, anyhow::Error> {
        let config = fs::read_to_string(path)
            .with_context(|| format!("Unable to read config file {}", path.display()))?;
        Config::from_toml(config.as_str())
    }

    pub fn from_toml(config: &str) -> Result<Config, anyhow::Error> {
        let config: Config = toml::from_str(config).with_context(|| "Unable to parse config")?;
        Ok(config)
    }

    pub fn from_env() -> Result<Config, anyhow::Error> {
        Config::from_vars(|key| env::var(key).ok())
    }

    /// Builds a config from `MONGODB_*`, `OTLP_ENDPOINT` and `HONEYCOMB_API_KEY` looked up
    /// through `lookup`, falling back to the defaults for unset keys.
    pub fn from_vars<F>(lookup: F) -> Result<Config, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let connect_timeout_secs = match lookup("MONGODB_CONNECT_TIMEOUT_SECS") {
            Some(value) => value
                .parse()
                .context("Unable to parse MONGODB_CONNECT_TIMEOUT_SECS value")?,
            None => defaults.connect_timeout_secs,
        };
        let telemetry = lookup("OTLP_ENDPOINT").map(|endpoint| TelemetryConfig {
            endpoint,
            api_key: lookup("HONEYCOMB_API_KEY"),
        });

        Ok(Config {
            mongodb_url: lookup("MONGODB_URL").unwrap_or(defaults.mongodb_url),
            database: lookup("MONGODB_DATABASE").unwrap_or(defaults.database),
            collection: lookup("MONGODB_COLLECTION").unwrap_or(defaults.collection),
            connect_timeout_secs,
            telemetry,
        })
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// `config.toml` in the working directory, then in `$CONFIGURATION_DIRECTORY`.
pub fn find_config_file() -> Option<PathBuf> {
    let config_current_dir = PathBuf::from("config.toml");
    if config_current_dir.exists() {
        return Some(config_current_dir);
    }
    if let Ok(config_env) = env::var("CONFIGURATION_DIRECTORY") {
        let config_path = PathBuf::from(config_env).join("config.toml");
        if config_path.exists() {
            return Some(config_path);
        }
    }

    None
}
