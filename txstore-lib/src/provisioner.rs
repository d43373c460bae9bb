use crate::indexes::transaction_indexes;
use crate::seed::seed_transactions;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};
use txstore_repo::index_spec::IndexSpec;
use txstore_repo::transaction_store::{Filter, StoreError, TransactionStore};

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Unable to connect to database")]
    Connection(#[source] StoreError),
    #[error("Unable to create {0}")]
    Schema(String, #[source] StoreError),
    #[error("Unable to insert seed transactions")]
    Insert(#[source] StoreError),
    #[error("Unable to read collection statistics")]
    Report(#[source] StoreError),
}

impl ProvisionError {
    /// An unreachable database is always a connection error, whichever step noticed it.
    fn classify(err: StoreError, otherwise: impl FnOnce(StoreError) -> ProvisionError) -> Self {
        if matches!(err, StoreError::Unreachable(_)) {
            ProvisionError::Connection(err)
        } else {
            otherwise(err)
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ProvisionOptions {
    /// Delete existing documents before seeding.
    pub reset: bool,
    /// Insert the seed batch. Without it only the schema is ensured.
    pub seed: bool,
}

impl Default for ProvisionOptions {
    fn default() -> Self {
        ProvisionOptions {
            reset: false,
            seed: true,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Statistics {
    pub collection: String,
    pub total_documents: u64,
    pub index_names: Vec<String>,
}

impl Statistics {
    pub fn index_count(&self) -> usize {
        self.index_names.len()
    }
}

impl Display for Statistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // sentence case: "Transactions collection statistics:"
        let mut chars = self.collection.chars();
        if let Some(first) = chars.next() {
            write!(f, "{}{}", first.to_uppercase(), chars.as_str())?;
        }
        writeln!(f, " collection statistics:")?;
        writeln!(f, "Total documents: {}", self.total_documents)?;
        write!(f, "Indexes created: {}", self.index_count())
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Report {
    pub collection_created: bool,
    pub deleted: u64,
    pub inserted: usize,
    pub statistics: Statistics,
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.statistics, f)
    }
}

/// Runs connect, ensure collection, ensure indexes, seed and report strictly in order.
/// The first failing step aborts the run.
pub struct Provisioner {
    store: Arc<dyn TransactionStore>,
    indexes: Vec<IndexSpec>,
    options: ProvisionOptions,
}

impl Provisioner {
    pub fn new(store: Arc<dyn TransactionStore>) -> Provisioner {
        Provisioner {
            store,
            indexes: transaction_indexes(),
            options: ProvisionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ProvisionOptions) -> Provisioner {
        self.options = options;
        self
    }

    #[instrument(skip(self), fields(collection = %self.store.collection_name()))]
    pub async fn run(&self) -> Result<Report, ProvisionError> {
        self.connect().await?;
        let collection_created = self.ensure_collection().await?;
        self.ensure_indexes().await?;
        info!("Collection and indexes created successfully");

        let deleted = if self.options.reset {
            self.reset().await?
        } else {
            0
        };
        let inserted = if self.options.seed {
            self.seed().await?
        } else {
            0
        };

        let statistics = self.report().await?;
        Ok(Report {
            collection_created,
            deleted,
            inserted,
            statistics,
        })
    }

    pub async fn connect(&self) -> Result<(), ProvisionError> {
        self.store
            .ping()
            .await
            .map_err(ProvisionError::Connection)?;
        info!("Database connected");
        Ok(())
    }

    pub async fn ensure_collection(&self) -> Result<bool, ProvisionError> {
        let collection = self.store.collection_name();
        let created = self.store.ensure_collection().await.map_err(|e| {
            ProvisionError::classify(e, |e| {
                ProvisionError::Schema(format!("collection {}", collection), e)
            })
        })?;
        if created {
            info!(collection, "Collection created");
        } else {
            info!(collection, "Collection already exists");
        }
        Ok(created)
    }

    /// Creates the indexes one after another; later indexes are not attempted after a failure.
    pub async fn ensure_indexes(&self) -> Result<Vec<String>, ProvisionError> {
        let mut names = Vec::with_capacity(self.indexes.len());
        for index in &self.indexes {
            let name = self.store.ensure_index(index).await.map_err(|e| {
                ProvisionError::classify(e, |e| {
                    ProvisionError::Schema(format!("index {}", index), e)
                })
            })?;
            info!(index = %name, "Index ensured");
            names.push(name);
        }
        Ok(names)
    }

    pub async fn reset(&self) -> Result<u64, ProvisionError> {
        let deleted = self
            .store
            .delete_all_transactions()
            .await
            .map_err(|e| ProvisionError::classify(e, ProvisionError::Insert))?;
        info!(deleted, "Cleared existing transactions");
        Ok(deleted)
    }

    /// Inserts the seed batch. Running this twice duplicates every record, nothing in the
    /// schema makes the records unique.
    pub async fn seed(&self) -> Result<usize, ProvisionError> {
        let existing = self
            .store
            .count_transactions(Filter::NONE)
            .await
            .map_err(|e| ProvisionError::classify(e, ProvisionError::Insert))?;
        if existing > 0 {
            warn!(
                existing,
                "Collection is not empty, seed transactions will be added again"
            );
        }

        let batch = seed_transactions().map_err(|e| ProvisionError::Insert(e.into()))?;
        let inserted = self
            .store
            .insert_transactions(&batch)
            .await
            .map_err(|e| ProvisionError::classify(e, ProvisionError::Insert))?;
        info!("Inserted {} test transactions", inserted);
        Ok(inserted)
    }

    pub async fn report(&self) -> Result<Statistics, ProvisionError> {
        let total_documents = self
            .store
            .count_transactions(Filter::NONE)
            .await
            .map_err(|e| ProvisionError::classify(e, ProvisionError::Report))?;
        let index_names = self
            .store
            .list_index_names()
            .await
            .map_err(|e| ProvisionError::classify(e, ProvisionError::Report))?;

        Ok(Statistics {
            collection: self.store.collection_name().to_owned(),
            total_documents,
            index_names,
        })
    }
}
