pub mod generator;

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use std::{env, fs};
use tracing::info;
use txstore_repo::transaction_store::TransactionStore;
use uuid::Uuid;

pub const COLLECTION: &str = "transactions";

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
            store: txstore_repo::mem_store::create_store(COLLECTION),
            mongo_database: None,
        },
        StoreType::Mongo => {
            let mongodb_url =
                test_mongodb_url(env::var("TEST_MONGODB_URL").ok(), "config_test.toml");
            let database = "txstore-test-".to_owned() + &Uuid::new_v4().to_string();
            let store = txstore_repo::mongo_store::create_store(
                &mongodb_url,
                &database,
                COLLECTION,
                Duration::from_secs(5),
            )
            .await
            .unwrap();
            info!(%database, "Created test store");
            TestStore {
                store,
                mongo_database: Some((mongodb_url, database)),
            }
        }
    }
}
