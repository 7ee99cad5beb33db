use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{format_timestamp, User};
use crate::domain::pagination::PageRequest;
use crate::storage::connection::DbConnection;
use crate::storage::error::{is_unique_violation_on, StoreError, StoreResult};
use crate::storage::keyset::KeysetQuery;

const SELECT_USERS: &str = "SELECT id, name, email, created_at FROM users";

/// Repository for user operations
#[derive(Clone)]
pub struct UserRepository {
    db: DbConnection,
}

impl UserRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a new user. Fails with `DuplicateEmail` if the address (compared
    /// case-insensitively) is already taken; the UNIQUE NOCASE column makes
    /// the check and the insert one atomic statement.
    pub async fn store_user(&self, user: &User) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(format_timestamp(&user.created_at))
        .execute(self.db.pool())
        .await
        .map_err(|e| {
            if is_unique_violation_on(&e, "users.email") {
                StoreError::DuplicateEmail(user.email.clone())
            } else {
                StoreError::Database(e)
            }
        })?;

        Ok(())
    }

    /// Get a user by ID
    pub async fn get_user(&self, user_id: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_USERS))
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;

        match row {
            Some(r) => Ok(Some(user_from_row(&r)?)),
            None => Ok(None),
        }
    }

    /// One page of users in ID order
    pub async fn list_users(&self, page: &PageRequest) -> StoreResult<Vec<User>> {
        let mut query = KeysetQuery::new(SELECT_USERS).page(page);
        let rows = query.build().fetch_all(self.db.pool()).await?;

        let users = rows
            .iter()
            .map(user_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Highest stored user ID, if any
    pub async fn latest_id(&self) -> StoreResult<Option<String>> {
        let row = sqlx::query("SELECT MAX(id) FROM users")
            .fetch_one(self.db.pool())
            .await?;
        Ok(row.try_get(0)?)
    }
}

fn user_from_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        created_at: parse_timestamp(row, "created_at")?,
    })
}

/// Decode an RFC 3339 TEXT column
pub(crate) fn parse_timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    let text: String = row.try_get(column)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}
