use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

// In-memory databases live and die with a single connection
const IN_MEMORY_URL: &str = "sqlite::memory:";

// How long a writer waits for another connection's write lock
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// DbConnection owns the connection pool. Cloning is cheap; every clone
/// shares the same pool.
#[derive(Clone)]
pub struct DbConnection {
    pool: SqlitePool,
}

impl DbConnection {
    /// Open (creating if missing) the database at `url` and set up the schema
    pub async fn new(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database URL: {}", url))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = if is_in_memory(url) {
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections)
                .connect_with(options.journal_mode(SqliteJournalMode::Wal))
                .await?
        };

        Self::setup_schema(&pool).await?;
        info!("Database ready at {}", url);

        Ok(Self { pool })
    }

    /// Private in-memory database, used by tests
    pub async fn in_memory() -> Result<Self> {
        Self::new(IN_MEMORY_URL, 1).await
    }

    /// Get the underlying SQLite pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                email TEXT NOT NULL COLLATE NOCASE UNIQUE,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transactions (
                id TEXT PRIMARY KEY NOT NULL,
                amount TEXT NOT NULL,
                description TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                user_id TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Per-user listing scans (user_id, id) in order
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_transactions_user_id
            ON transactions(user_id, id);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn test_schema_is_created() {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");

        let rows = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(db.pool())
            .await
            .unwrap();
        let tables: Vec<String> = rows.iter().map(|r| r.get("name")).collect();

        assert!(tables.contains(&"users".to_string()));
        assert!(tables.contains(&"transactions".to_string()));
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let db = DbConnection::in_memory().await.unwrap();

        let row = sqlx::query("PRAGMA foreign_keys").fetch_one(db.pool()).await.unwrap();
        let enabled: i64 = row.get(0);
        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn test_file_database_created_if_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");
        let url = format!("sqlite:{}", path.display());

        assert!(!path.exists());
        let _db = DbConnection::new(&url, 2).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_file_database_uses_wal_and_waits_for_locks() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("ledger.db").display());
        let db = DbConnection::new(&url, 2).await.unwrap();

        let mode: String = sqlx::query("PRAGMA journal_mode")
            .fetch_one(db.pool())
            .await
            .unwrap()
            .get(0);
        assert_eq!(mode, "wal");

        let timeout: i64 = sqlx::query("PRAGMA busy_timeout")
            .fetch_one(db.pool())
            .await
            .unwrap()
            .get(0);
        assert_eq!(timeout, BUSY_TIMEOUT.as_millis() as i64);
    }

    #[test]
    fn test_in_memory_detection() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite:file:memdb_1?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite:ledger.db"));
    }
}
