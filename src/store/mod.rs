//! SQLite access for bands and songs.
//!
//! A [`Database`] wraps one connection pool and is cloned into every request
//! handler; there is no process-wide connection.

mod bands;
mod songs;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

/// Handle to the catalog database.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a pool against `url` (for example `sqlite://bandas.db?mode=rwc`).
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        debug!(url, max_connections, "database pool opened");
        Ok(Self { pool })
    }

    /// Private in-memory database.
    ///
    /// Capped at one connection, since every SQLite memory connection is its
    /// own database.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the `bands` and `songs` tables when they do not exist yet.
    ///
    /// `songs.band_id` carries no foreign key: songs may point at bands that
    /// do not (or no longer) exist.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bands (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS songs (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                band_id TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("database schema ready");
        Ok(())
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
