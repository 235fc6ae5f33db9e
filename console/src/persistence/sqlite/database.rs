//! SQLite connection handle and migration runner.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::config::DatabaseConfig;
use crate::persistence::PersistenceError;

/// The single database connection shared by every repository.
///
/// Built once in `main` and handed down; the pool is capped at one
/// connection so all statements run over the same session.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the database named by `config.url`, run migrations,
    /// and return a ready-to-use `Database`.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, PersistenceError> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        if config.username.is_some() {
            tracing::debug!(
                username = config.username.as_deref().unwrap_or_default(),
                "Ignoring database credentials, SQLite does not authenticate"
            );
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;
        tracing::info!(url = %config.url, "Database ready");
        Ok(db)
    }

    /// Create an in-memory database for testing. Migrations are applied.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self, PersistenceError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Run embedded migrations from `console/migrations/`.
    async fn run_migrations(&self) -> Result<(), PersistenceError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| PersistenceError::Migration(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the connection; pending statements finish first.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_in_memory() {
        let db = Database::new_in_memory().await.unwrap();
        let row: (i64,) = sqlx::query_as("SELECT 1")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(row.0, 1);
    }

    #[tokio::test]
    async fn test_migrations_create_tables() {
        let db = Database::new_in_memory().await.unwrap();
        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
                .fetch_all(db.pool())
                .await
                .unwrap();
        let names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        for table in [
            "coaches",
            "players",
            "matches",
            "statistics",
            "users",
            "opinions",
            "participations",
            "follows",
        ] {
            assert!(names.contains(&table), "missing table {table}");
        }
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let db = Database::new_in_memory().await.unwrap();
        let result = sqlx::query(
            "INSERT INTO statistics (player_id, match_id, attacks, serves, blocks, digs, errors) \
             VALUES (99, 99, 0, 0, 0, 0, 0)",
        )
        .execute(db.pool())
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_open_file_based_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("vnl.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            username: None,
            password: None,
        };

        let db = Database::open(&config).await.unwrap();
        let row: (i64,) = sqlx::query_as("SELECT 1")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(row.0, 1);
        db.close().await;
        assert!(db_path.exists());

        // Migrations are idempotent across restarts.
        let db = Database::open(&config).await.unwrap();
        db.close().await;
    }
}
