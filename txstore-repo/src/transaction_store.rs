use crate::index_spec::IndexSpec;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Storage seam for a single transactions collection.
///
/// Every implementation is bound to one collection when constructed. Schema
/// operations are idempotent; inserts are not.
#[async_trait]
pub trait TransactionStore: Sync + Send {
    /// Name of the collection this store writes to.
    fn collection_name(&self) -> &str;

    /// Checks that the database answers. Fails with [`StoreError::Unreachable`] otherwise.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Creates the collection if it does not exist yet. Returns `true` if it was created.
    async fn ensure_collection(&self) -> Result<bool, StoreError>;

    /// Creates one index, a no-op if an identical index already exists.
    /// Returns the index name.
    async fn ensure_index(&self, index: &IndexSpec) -> Result<String, StoreError>;

    /// Inserts all transactions as one batch and returns how many were inserted.
    async fn insert_transactions(&self, transactions: &[Transaction])
        -> Result<usize, StoreError>;

    async fn delete_all_transactions(&self) -> Result<u64, StoreError>;

    async fn count_transactions(&self, filter: Filter) -> Result<u64, StoreError>;

    /// Matching transactions, oldest `created_at` first.
    async fn find_transactions(&self, filter: Filter) -> Result<Vec<Transaction>, StoreError>;

    /// Names of all indexes on the collection including the primary `_id_` index.
    /// Empty if the collection does not exist.
    async fn list_index_names(&self) -> Result<Vec<String>, StoreError>;
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database unreachable: {0:#}")]
    Unreachable(anyhow::Error),
    #[error("Index {0} conflicts with an existing index")]
    IndexConflict(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub const fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Transaction {
    pub plan_id: i32,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub user_id: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub const fn new(
        plan_id: i32,
        transaction_type: TransactionType,
        amount: Decimal,
        description: String,
        category: String,
        user_id: String,
        created_at: DateTime<Utc>,
    ) -> Transaction {
        Transaction {
            plan_id,
            transaction_type,
            amount,
            description,
            category,
            user_id,
            created_at,
        }
    }
}

/// Equality filter used to read seeded data back. Unset fields match everything.
#[derive(Clone, Default, Debug)]
pub struct Filter {
    pub plan_id: Option<i32>,
    pub user_id: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub category: Option<String>,
}

impl Filter {
    pub const NONE: Filter = Filter {
        plan_id: None,
        user_id: None,
        transaction_type: None,
        category: None,
    };

    pub fn plan(plan_id: i32) -> Filter {
        Filter {
            plan_id: Some(plan_id),
            ..Filter::NONE
        }
    }

    pub fn user_and_plan(user_id: &str, plan_id: i32) -> Filter {
        Filter {
            plan_id: Some(plan_id),
            user_id: Some(user_id.to_owned()),
            ..Filter::NONE
        }
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(plan_id) = self.plan_id {
            if transaction.plan_id != plan_id {
                return false;
            }
        }
        if let Some(user_id) = &self.user_id {
            if &transaction.user_id != user_id {
                return false;
            }
        }
        if let Some(transaction_type) = self.transaction_type {
            if transaction.transaction_type != transaction_type {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &transaction.category != category {
                return false;
            }
        }
        true
    }
}
