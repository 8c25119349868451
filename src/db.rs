//! Storage opener: owns the SQLite pool and creates the schema on first use.

use crate::contract::{COL_BREED, COL_GENDER, COL_ID, COL_NAME, COL_WEIGHT, TABLE};
use crate::error::ProviderError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;

/// Schema version recorded in `PRAGMA user_version`. If the schema changes,
/// this must be incremented and an explicit migration step added to `upgrade`.
pub const SCHEMA_VERSION: i64 = 1;

fn create_pets_table_sql() -> String {
    format!(
        "CREATE TABLE {}({} INTEGER PRIMARY KEY AUTOINCREMENT, \
         {} TEXT NOT NULL, {} TEXT, {} INTEGER NOT NULL, \
         {} INTEGER NOT NULL DEFAULT 0)",
        TABLE, COL_ID, COL_NAME, COL_BREED, COL_GENDER, COL_WEIGHT
    )
}

/// Handle to the on-disk store. One cached pool serves both reads and
/// writes; SQLite's own locking serializes concurrent callers.
#[derive(Debug, Clone)]
pub struct ShelterDb {
    pool: SqlitePool,
}

impl ShelterDb {
    /// Open (creating if missing) the store at `path` and ensure the schema
    /// exists. The DDL runs at most once per store lifetime, guarded by
    /// `PRAGMA user_version`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        ensure_schema(&pool).await?;
        Ok(ShelterDb { pool })
    }

    /// Read-capable handle. Safe to fetch repeatedly.
    pub fn read_pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Write-capable handle. Safe to fetch repeatedly.
    pub fn write_pool(&self) -> &SqlitePool {
        &self.pool
    }
}

async fn ensure_schema(pool: &SqlitePool) -> Result<(), ProviderError> {
    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;
    if version == 0 {
        let ddl = create_pets_table_sql();
        tracing::debug!(sql = %ddl, "creating schema");
        sqlx::query(&ddl).execute(pool).await?;
        sqlx::query(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))
            .execute(pool)
            .await?;
    } else if version != SCHEMA_VERSION {
        upgrade(pool, version, SCHEMA_VERSION).await?;
    }
    Ok(())
}

/// Upgrade hook. The schema is still at version 1, so there is nothing to be
/// done here; future versions must add explicit migration steps.
async fn upgrade(_pool: &SqlitePool, from: i64, to: i64) -> Result<(), ProviderError> {
    tracing::warn!(from, to, "no migration path defined, leaving schema as-is");
    Ok(())
}
