use crate::index_spec::IndexSpec;
use crate::transaction_store::{Filter, StoreError, Transaction, TransactionStore};
use anyhow::anyhow;
use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

const PRIMARY_INDEX: &str = "_id_";

struct State {
    exists: bool,
    // index names in creation order, `_id_` first once the collection exists
    indexes: Vec<String>,
    transactions: Vec<Transaction>,
}

impl State {
    /// MongoDB creates a collection implicitly on first index or document write.
    fn create_if_missing(&mut self) -> bool {
        if self.exists {
            return false;
        }
        self.exists = true;
        self.indexes.push(PRIMARY_INDEX.to_owned());
        true
    }
}

pub struct MemTransactionStore {
    collection: String,
    state: RwLock<State>,
}

impl MemTransactionStore {
    pub fn new(collection: &str) -> MemTransactionStore {
        let state = State {
            exists: false,
            indexes: Vec::new(),
            transactions: Vec::new(),
        };
        MemTransactionStore {
            collection: collection.to_owned(),
            state: RwLock::new(state),
        }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<State>, anyhow::Error> {
        self.state
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<State>, anyhow::Error> {
        self.state
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }
}

#[async_trait]
impl TransactionStore for MemTransactionStore {
    fn collection_name(&self) -> &str {
        &self.collection
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read_lock()
            .map(|_| ())
            .map_err(StoreError::Unreachable)
    }

    async fn ensure_collection(&self) -> Result<bool, StoreError> {
        let mut write_guard = self.write_lock()?;
        Ok(write_guard.create_if_missing())
    }

    async fn ensure_index(&self, index: &IndexSpec) -> Result<String, StoreError> {
        let mut write_guard = self.write_lock()?;
        write_guard.create_if_missing();

        // names are derived from the keys, so an equal name means an equal index
        let name = index.name();
        if !write_guard.indexes.contains(&name) {
            write_guard.indexes.push(name.clone());
        }

        Ok(name)
    }

    async fn insert_transactions(
        &self,
        transactions: &[Transaction],
    ) -> Result<usize, StoreError> {
        if transactions.is_empty() {
            return Err(anyhow!("Cannot insert an empty batch").into());
        }

        let mut write_guard = self.write_lock()?;
        write_guard.create_if_missing();
        write_guard
            .transactions
            .extend(transactions.iter().cloned());

        Ok(transactions.len())
    }

    async fn delete_all_transactions(&self) -> Result<u64, StoreError> {
        let mut write_guard = self.write_lock()?;
        let deleted = write_guard.transactions.len() as u64;
        write_guard.transactions.clear();
        Ok(deleted)
    }

    async fn count_transactions(&self, filter: Filter) -> Result<u64, StoreError> {
        let read_guard = self.read_lock()?;
        let count = read_guard
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .count();
        Ok(count as u64)
    }

    async fn find_transactions(&self, filter: Filter) -> Result<Vec<Transaction>, StoreError> {
        let read_guard = self.read_lock()?;
        let mut transactions: Vec<Transaction> = read_guard
            .transactions
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        // stable, so equal timestamps keep insertion order
        transactions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(transactions)
    }

    async fn list_index_names(&self) -> Result<Vec<String>, StoreError> {
        let read_guard = self.read_lock()?;
        Ok(read_guard.indexes.clone())
    }
}
