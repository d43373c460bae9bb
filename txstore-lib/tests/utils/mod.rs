pub mod mock;

use serde::Deserialize;
use std::sync::Arc;
use std::{env, fs};
use tracing::info;
use txstore_lib::config::{Config, DEFAULT_COLLECTION};
use txstore_repo::transaction_store::TransactionStore;
use uuid::Uuid;

#[derive(Deserialize)]
struct TestConfig {
    mongodb_url: String,
}

#[derive(Debug)]
pub enum StoreType {
    Mongo,
    Mem,
}

pub struct TestStore {
    pub store: Arc<dyn TransactionStore>,
    mongo_database: Option<(String, String)>,
}

impl TestStore {
    pub async fn cleanup(self) {
        if let Some((mongodb_url, database)) = self.mongo_database {
            let client = mongodb::Client::with_uri_str(&mongodb_url).await.unwrap();
            client.database(&database).drop(None).await.unwrap();
            info!(%database, "Dropped test database");
        }
    }
}

/// `TEST_MONGODB_URL` wins over the config file. Panics when neither is available.
pub fn test_mongodb_url(env_url: Option<String>, config_path: &str) -> String {
    if let Some(url) = env_url {
        return url;
    }
    let config = fs::read_to_string(config_path).unwrap_or_else(|_| {
        panic!(
            "No test MongoDB configured: set TEST_MONGODB_URL or create {}",
            config_path
        )
    });
    let config: TestConfig = toml::from_str(config.as_str()).unwrap();
    config.mongodb_url
}

pub async fn build_store(store_type: StoreType) -> TestStore {
    match store_type {
        StoreType::Mem => TestStore {
            store: txstore_repo::mem_store::create_store(DEFAULT_COLLECTION),
            mongo_database: None,
        },
        StoreType::Mongo => {
            let mongodb_url =
                test_mongodb_url(env::var("TEST_MONGODB_URL").ok(), "config_test.toml");
            let config = Config {
                mongodb_url,
                database: "txstore-test-".to_owned() + &Uuid::new_v4().to_string(),
                ..Config::default()
            };
            let store = txstore_repo::mongo_store::create_store(
                &config.mongodb_url,
                &config.database,
                &config.collection,
                config.connect_timeout(),
            )
            .await
            .unwrap();
            info!(database = %config.database, "Created test store");
            TestStore {
                store,
                mongo_database: Some((config.mongodb_url, config.database)),
            }
        }
    }
}
