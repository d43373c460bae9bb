mod error;
mod transaction_store;

use crate::transaction_store::{StoreError, TransactionStore};
use anyhow::Context;
use mongodb::options::ClientOptions;
use mongodb::Client;
use std::sync::Arc;
use std::time::Duration;

pub use transaction_store::MongoTransactionStore;

const APP_NAME: &str = "txstore-provision";

/// Builds a store bound to `database.collection`.
///
/// The driver connects lazily, so this only fails on a malformed URL or a failed
/// SRV lookup. Use [`TransactionStore::ping`] to check reachability.
pub async fn create_store(
    mongodb_url: &str,
    database: &str,
    collection: &str,
    connect_timeout: Duration,
) -> Result<Arc<dyn TransactionStore>, StoreError> {
    let mut options = ClientOptions::parse(mongodb_url)
        .await
        .context("Unable to parse MongoDB URL")
        .map_err(StoreError::Unreachable)?;
    options.app_name = Some(APP_NAME.to_owned());
    options.connect_timeout = Some(connect_timeout);
    options.server_selection_timeout = Some(connect_timeout);

    let client = Client::with_options(options)
        .context("Unable to create MongoDB client")
        .map_err(StoreError::Unreachable)?;
    let database = client.database(database);

    Ok(Arc::new(MongoTransactionStore::new(client, database, collection)))
}
