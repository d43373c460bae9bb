//! Demo transactions loaded into a freshly provisioned collection.

use anyhow::Context;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use txstore_repo::transaction_store::{Transaction, TransactionType};
use TransactionType::{Expense, Income};

pub const SEED_USER: &str = "admin";

struct SeedRow {
    plan_id: i32,
    transaction_type: TransactionType,
    amount: i64,
    description: &'static str,
    category: &'static str,
    created_at: &'static str,
}

const SEED_ROWS: [SeedRow; 8] = [
    SeedRow {
        plan_id: 1,
        transaction_type: Income,
        amount: 5000,
        description: "Salary payment",
        category: "salary",
        created_at: "2024-01-01T10:00:00Z",
    },
    SeedRow {
        plan_id: 1,
        transaction_type: Expense,
        amount: 1200,
        description: "Rent payment",
        category: "housing",
        created_at: "2024-01-02T14:30:00Z",
    },
    SeedRow {
        plan_id: 1,
        transaction_type: Expense,
        amount: 350,
        description: "Grocery shopping",
        category: "food",
        created_at: "2024-01-03T09:15:00Z",
    },
    SeedRow {
        plan_id: 1,
        transaction_type: Expense,
        amount: 80,
        description: "Gas station",
        category: "transportation",
        created_at: "2024-01-04T16:45:00Z",
    },
    SeedRow {
        plan_id: 2,
        transaction_type: Income,
        amount: 2000,
        description: "Freelance project",
        category: "freelance",
        created_at: "2024-01-05T11:20:00Z",
    },
    SeedRow {
        plan_id: 2,
        transaction_type: Expense,
        amount: 150,
        description: "Internet bill",
        category: "utilities",
        created_at: "2024-01-06T13:00:00Z",
    },
    SeedRow {
        plan_id: 1,
        transaction_type: Income,
        amount: 500,
        description: "Bonus payment",
        category: "bonus",
        created_at: "2024-01-07T15:30:00Z",
    },
    SeedRow {
        plan_id: 2,
        transaction_type: Expense,
        amount: 45,
        description: "Coffee shop",
        category: "entertainment",
        created_at: "2024-01-08T08:45:00Z",
    },
];

/// The fixed seed batch, oldest first.
pub fn seed_transactions() -> Result<Vec<Transaction>, anyhow::Error> {
    SEED_ROWS
        .iter()
        .map(|row| -> Result<Transaction, anyhow::Error> {
            let created_at = DateTime::parse_from_rfc3339(row.created_at)
                .with_context(|| format!("Invalid seed timestamp {}", row.created_at))?
                .with_timezone(&Utc);
            Ok(Transaction::new(
                row.plan_id,
                row.transaction_type,
                Decimal::from(row.amount),
                row.description.to_owned(),
                row.category.to_owned(),
                SEED_USER.to_owned(),
                created_at,
            ))
        })
        .collect()
}
