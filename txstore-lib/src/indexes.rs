//! Secondary indexes of the transactions collection.
//!
//! - `{ "plan_id": 1 }`, `{ "user_id": 1 }`, `{ "type": 1 }`, `{ "category": 1 }`
//! - `{ "created_at": -1 }` - newest first listings
//! - `{ "amount": 1 }`
//! - `{ "user_id": 1, "plan_id": 1 }` - a user's transactions within a plan
//! - `{ "type": 1, "category": 1 }`
//! - `{ "created_at": -1, "type": 1 }` - analytics by date and type
//!
//! Existing deployments depend on these exact keys and directions.

use txstore_repo::index_spec::{IndexSpec, SortOrder};

/// In creation order.
pub fn transaction_indexes() -> Vec<IndexSpec> {
    vec![
        IndexSpec::ascending("plan_id"),
        IndexSpec::ascending("user_id"),
        IndexSpec::ascending("type"),
        IndexSpec::ascending("category"),
        IndexSpec::descending("created_at"),
        IndexSpec::ascending("amount"),
        IndexSpec::ascending("user_id").then("plan_id", SortOrder::Ascending),
        IndexSpec::ascending("type").then("category", SortOrder::Ascending),
        IndexSpec::descending("created_at").then("type", SortOrder::Ascending),
    ]
}
