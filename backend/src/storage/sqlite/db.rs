use crate::error::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::path::PathBuf;
use std::sync::Arc;

// File name of the production database inside the application data directory
const DATABASE_FILE: &str = "finances.db";

/// DbConnection manages the sqlite pool and schema setup
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?;
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Open the database at its default on-disk location. The file persists
    /// across process restarts.
    pub async fn open_default() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("finances-tracker");
        std::fs::create_dir_all(&data_dir)?;

        let url = format!("sqlite://{}", data_dir.join(DATABASE_FILE).display());
        Self::new(&url).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Create transactions table. Timestamps are stored as epoch
        // milliseconds; type and category columns hold stable tags.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                description TEXT NOT NULL,
                date_ms INTEGER NOT NULL,
                tx_type TEXT NOT NULL,
                category TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for ordering queries by timestamp
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_transactions_date_ms
            ON transactions(date_ms DESC);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
