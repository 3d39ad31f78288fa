//! Store handle: opening, pooling, and the public read/write surface

use crate::error::{Result, StoreError};
use crate::records;
use crate::types::{CacheRecord, Lookup};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

const MAX_CONNECTIONS: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Process-wide handle to the durable cache
///
/// Cloning is cheap and every clone shares the same connection pool. SQLite in
/// WAL mode lets readers proceed while a single writer commits; conflicting
/// writers wait on the busy timeout rather than failing.
#[derive(Clone)]
pub struct CacheStore {
    pool: SqlitePool,
    path: PathBuf,
}

impl CacheStore {
    /// Open (creating if absent) the store at `path`
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Opening cache store...");

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Init(format!(
                    "failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let opts = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(BUSY_TIMEOUT);

        let init_err = |e: sqlx::Error| {
            StoreError::Init(format!("failed to open {}: {}", path.display(), e))
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(opts)
            .await
            .map_err(init_err)?;

        records::ensure_schema(&pool).await.map_err(init_err)?;

        info!(path = %path.display(), "Cache store ready");
        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Exact-key point lookup
    pub async fn get(&self, key: &str) -> Result<Lookup> {
        Ok(records::get(&self.pool, key).await?)
    }

    /// Point lookup that also follows aliases
    pub async fn resolve(&self, key: &str) -> Result<Lookup> {
        Ok(records::resolve(&self.pool, key).await?)
    }

    /// Insert or replace a record
    pub async fn put(&self, record: &CacheRecord) -> Result<()> {
        debug!(key = %record.key, bytes = record.payload.len(), "Writing cache record");
        Ok(records::upsert(&self.pool, record).await?)
    }

    /// Insert or replace a record and point `aliases` at it, atomically
    pub async fn put_with_aliases(&self, record: &CacheRecord, aliases: &[String]) -> Result<()> {
        debug!(
            key = %record.key,
            aliases = ?aliases,
            bytes = record.payload.len(),
            "Writing cache record with aliases"
        );
        Ok(records::upsert_with_aliases(&self.pool, record, aliases).await?)
    }

    /// Number of stored records
    pub async fn count(&self) -> Result<u64> {
        let n = records::count(&self.pool).await?;
        Ok(n.max(0) as u64)
    }

    /// Close the pool, waiting for in-flight operations to finish
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
