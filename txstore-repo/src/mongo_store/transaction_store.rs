use crate::index_spec::IndexSpec;
use crate::mongo_store::error::{
    classify, classify_index, command_code, NAMESPACE_EXISTS, NAMESPACE_NOT_FOUND,
};
use crate::transaction_store::{Filter, StoreError, Transaction, TransactionStore};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::FindOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::{debug, instrument};

pub struct MongoTransactionStore {
    client: Client,
    database: Database,
    collection: Collection<Transaction>,
    collection_name: String,
}

impl MongoTransactionStore {
    pub fn new(client: Client, database: Database, collection: &str) -> MongoTransactionStore {
        MongoTransactionStore {
            client,
            collection: database.collection(collection),
            database,
            collection_name: collection.to_owned(),
        }
    }
}

fn filter_document(filter: Filter) -> Document {
    let mut document = Document::new();
    if let Some(plan_id) = filter.plan_id {
        document.insert("plan_id", plan_id);
    }
    if let Some(user_id) = filter.user_id {
        document.insert("user_id", user_id);
    }
    if let Some(transaction_type) = filter.transaction_type {
        document.insert("type", transaction_type.as_str());
    }
    if let Some(category) = filter.category {
        document.insert("category", category);
    }
    document
}

fn index_model(index: &IndexSpec) -> IndexModel {
    let mut keys = Document::new();
    for (field, order) in index.keys() {
        keys.insert(field.clone(), order.direction());
    }
    IndexModel::builder().keys(keys).build()
}

#[async_trait]
impl TransactionStore for MongoTransactionStore {
    fn collection_name(&self) -> &str {
        &self.collection_name
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| StoreError::Unreachable(anyhow::Error::new(e).context("Ping failed")))?;
        Ok(())
    }

    #[instrument(skip(self), fields(collection = %self.collection_name))]
    async fn ensure_collection(&self) -> Result<bool, StoreError> {
        let existing = self
            .database
            .list_collection_names(doc! { "name": self.collection_name.as_str() })
            .await
            .map_err(|e| classify(e, "Unable to list collections".to_owned()))?;
        if !existing.is_empty() {
            return Ok(false);
        }

        match self
            .database
            .create_collection(&self.collection_name, None)
            .await
        {
            Ok(()) => Ok(true),
            Err(e) if command_code(&e) == Some(NAMESPACE_EXISTS) => {
                debug!("Collection created concurrently");
                Ok(false)
            }
            Err(e) => Err(classify(
                e,
                format!("Unable to create collection {}", self.collection_name),
            )),
        }
    }

    #[instrument(skip(self, index), fields(index = %index))]
    async fn ensure_index(&self, index: &IndexSpec) -> Result<String, StoreError> {
        let name = index.name();
        let result = self
            .collection
            .create_index(index_model(index), None)
            .await
            .map_err(|e| classify_index(e, &name))?;
        Ok(result.index_name)
    }

    #[instrument(skip(self, transactions), fields(count = transactions.len()))]
    async fn insert_transactions(
        &self,
        transactions: &[Transaction],
    ) -> Result<usize, StoreError> {
        let result = self
            .collection
            .insert_many(transactions, None)
            .await
            .map_err(|e| classify(e, "Unable to insert transactions".to_owned()))?;
        Ok(result.inserted_ids.len())
    }

    #[instrument(skip(self))]
    async fn delete_all_transactions(&self) -> Result<u64, StoreError> {
        let result = self
            .collection
            .delete_many(doc! {}, None)
            .await
            .map_err(|e| classify(e, "Unable to delete transactions".to_owned()))?;
        Ok(result.deleted_count)
    }

    #[instrument(skip(self))]
    async fn count_transactions(&self, filter: Filter) -> Result<u64, StoreError> {
        let count = self
            .collection
            .count_documents(filter_document(filter), None)
            .await
            .map_err(|e| classify(e, "Unable to count transactions".to_owned()))?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn find_transactions(&self, filter: Filter) -> Result<Vec<Transaction>, StoreError> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": 1, "_id": 1 })
            .build();
        let cursor = self
            .collection
            .find(filter_document(filter), options)
            .await
            .map_err(|e| classify(e, "Unable to find transactions".to_owned()))?;
        let transactions: Vec<Transaction> = cursor
            .try_collect()
            .await
            .map_err(|e| classify(e, "Unable to read transactions".to_owned()))?;
        Ok(transactions)
    }

    #[instrument(skip(self))]
    async fn list_index_names(&self) -> Result<Vec<String>, StoreError> {
        match self.collection.list_index_names().await {
            Ok(names) => Ok(names),
            Err(e) if command_code(&e) == Some(NAMESPACE_NOT_FOUND) => Ok(Vec::new()),
            Err(e) => Err(classify(e, "Unable to list indexes".to_owned())),
        }
    }
}
