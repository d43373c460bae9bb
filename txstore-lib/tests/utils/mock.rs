use anyhow::anyhow;
use async_trait::async_trait;
use std::sync::Arc;
use txstore_repo::index_spec::IndexSpec;
use txstore_repo::mem_store::MemTransactionStore;
use txstore_repo::transaction_store::{Filter, StoreError, Transaction, TransactionStore};

#[allow(dead_code)]
#[derive(Clone, Copy, Debug)]
pub enum FailAt {
    Ping,
    Collection,
    Index(&'static str),
    Insert,
}

#[allow(dead_code)]
#[derive(Clone, Copy, Debug)]
pub enum Failure {
    Unreachable,
    Rejected,
}

/// Delegates to an in-memory store but fails the chosen step.
pub struct FailingStore {
    inner: Arc<MemTransactionStore>,
    fail_at: FailAt,
    failure: Failure,
}

impl FailingStore {
    pub fn new(
        inner: Arc<MemTransactionStore>,
        fail_at: FailAt,
        failure: Failure,
    ) -> FailingStore {
        FailingStore {
            inner,
            fail_at,
            failure,
        }
    }

    fn error(&self, rejected: StoreError) -> StoreError {
        match self.failure {
            Failure::Unreachable => StoreError::Unreachable(anyhow!("connection refused")),
            Failure::Rejected => rejected,
        }
    }
}

#[async_trait]
impl TransactionStore for FailingStore {
    fn collection_name(&self) -> &str {
        self.inner.collection_name()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if let FailAt::Ping = self.fail_at {
            return Err(StoreError::Unreachable(anyhow!("connection refused")));
        }
        self.inner.ping().await
    }

    async fn ensure_collection(&self) -> Result<bool, StoreError> {
        if let FailAt::Collection = self.fail_at {
            return Err(self.error(anyhow!("not authorized").into()));
        }
        self.inner.ensure_collection().await
    }

    async fn ensure_index(&self, index: &IndexSpec) -> Result<String, StoreError> {
        if let FailAt::Index(name) = self.fail_at {
            if index.name() == name {
                return Err(self.error(StoreError::IndexConflict(index.name())));
            }
        }
        self.inner.ensure_index(index).await
    }

    async fn insert_transactions(
        &self,
        transactions: &[Transaction],
    ) -> Result<usize, StoreError> {
        if let FailAt::Insert = self.fail_at {
            return Err(self.error(anyhow!("document failed validation").into()));
        }
        self.inner.insert_transactions(transactions).await
    }

    async fn delete_all_transactions(&self) -> Result<u64, StoreError> {
        self.inner.delete_all_transactions().await
    }

    async fn count_transactions(&self, filter: Filter) -> Result<u64, StoreError> {
        self.inner.count_transactions(filter).await
    }

    async fn find_transactions(&self, filter: Filter) -> Result<Vec<Transaction>, StoreError> {
        self.inner.find_transactions(filter).await
    }

    async fn list_index_names(&self) -> Result<Vec<String>, StoreError> {
        self.inner.list_index_names().await
    }
}
