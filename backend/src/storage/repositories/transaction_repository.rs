use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{format_timestamp, Transaction};
use crate::domain::pagination::PageRequest;
use crate::storage::connection::DbConnection;
use crate::storage::error::{is_foreign_key_violation, StoreError, StoreResult};
use crate::storage::keyset::KeysetQuery;
use crate::storage::repositories::user_repository::parse_timestamp;

const SELECT_TRANSACTIONS: &str =
    "SELECT id, amount, description, timestamp, user_id FROM transactions";

/// Repository for transaction operations
#[derive(Clone)]
pub struct TransactionRepository {
    db: DbConnection,
}

impl TransactionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a transaction. The owning user is looked up by the insert
    /// itself, so the check and the write are one atomic statement; if the
    /// user is missing nothing is written.
    pub async fn store_transaction(&self, transaction: &Transaction) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO transactions (id, amount, description, timestamp, user_id)
            SELECT ?, ?, ?, ?, id FROM users WHERE id = ?
            "#,
        )
        .bind(&transaction.id)
        .bind(&transaction.amount)
        .bind(&transaction.description)
        .bind(format_timestamp(&transaction.timestamp))
        .bind(&transaction.user_id)
        .execute(self.db.pool())
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                StoreError::MissingUser(transaction.user_id.clone())
            } else {
                StoreError::Database(e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::MissingUser(transaction.user_id.clone()));
        }
        Ok(())
    }

    /// Get a transaction by ID
    pub async fn get_transaction(&self, transaction_id: &str) -> StoreResult<Option<Transaction>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_TRANSACTIONS))
            .bind(transaction_id)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(r) => Ok(Some(transaction_from_row(&r)?)),
            None => Ok(None),
        }
    }

    /// One page of all transactions in ID order
    pub async fn list_transactions(&self, page: &PageRequest) -> StoreResult<Vec<Transaction>> {
        let mut query = KeysetQuery::new(SELECT_TRANSACTIONS).page(page);
        let rows = query.build().fetch_all(self.db.pool()).await?;
        rows_to_transactions(&rows)
    }

    /// One page of a single user's transactions in ID order
    pub async fn list_transactions_for_user(
        &self,
        user_id: &str,
        page: &PageRequest,
    ) -> StoreResult<Vec<Transaction>> {
        let mut query = KeysetQuery::new(SELECT_TRANSACTIONS)
            .filter_eq("user_id", user_id.to_string())
            .page(page);
        let rows = query.build().fetch_all(self.db.pool()).await?;
        rows_to_transactions(&rows)
    }

    /// Highest stored transaction ID, if any
    pub async fn latest_id(&self) -> StoreResult<Option<String>> {
        let row = sqlx::query("SELECT MAX(id) FROM transactions")
            .fetch_one(self.db.pool())
            .await?;
        Ok(row.try_get(0)?)
    }
}

fn rows_to_transactions(rows: &[SqliteRow]) -> StoreResult<Vec<Transaction>> {
    let transactions = rows
        .iter()
        .map(transaction_from_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(transactions)
}

fn transaction_from_row(row: &SqliteRow) -> Result<Transaction, sqlx::Error> {
    Ok(Transaction {
        id: row.try_get("id")?,
        amount: row.try_get("amount")?,
        description: row.try_get("description")?,
        timestamp: parse_timestamp(row, "timestamp")?,
        user_id: row.try_get("user_id")?,
    })
}
