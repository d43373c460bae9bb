use crate::transaction_store::TransactionStore;
use std::sync::Arc;

mod transaction_store;

pub use transaction_store::MemTransactionStore;

pub fn create_store(collection: &str) -> Arc<dyn TransactionStore> {
    Arc::new(MemTransactionStore::new(collection))
}
