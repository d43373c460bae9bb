use chrono::{DateTime, TimeZone, Utc};
use fake::faker::lorem::en::{Word, Words};
use fake::{Fake, Faker};
use rust_decimal::Decimal;
use txstore_repo::transaction_store::{Transaction, TransactionType};

// whole seconds only, BSON datetimes keep millisecond precision
fn fake_timestamp() -> DateTime<Utc> {
    let seconds: i64 = (1_600_000_000..1_700_000_000).fake();
    Utc.timestamp_opt(seconds, 0).unwrap()
}

pub fn generate_transaction() -> Transaction {
    let transaction_type = if Faker.fake::<bool>() {
        TransactionType::Income
    } else {
        TransactionType::Expense
    };
    let description: Vec<String> = Words(1..4).fake();

    Transaction::new(
        (1..10).fake(),
        transaction_type,
        Decimal::from((1..100_000).fake::<i32>()),
        description.join(" "),
        Word().fake(),
        "test-user".to_owned(),
        fake_timestamp(),
    )
}

pub fn generate_transaction_for(user_id: &str, plan_id: i32) -> Transaction {
    Transaction {
        user_id: user_id.to_owned(),
        plan_id,
        ..generate_transaction()
    }
}

pub fn generate_transaction_at(created_at: DateTime<Utc>) -> Transaction {
    Transaction {
        created_at,
        ..generate_transaction()
    }
}
