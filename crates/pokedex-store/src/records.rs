use crate::types::{CacheRecord, Lookup};
use sqlx::SqlitePool;

/// Create the record and alias tables if they do not exist yet
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cache (
            key TEXT PRIMARY KEY,
            payload TEXT NOT NULL,
            fetched_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cache_alias (
            alias TEXT PRIMARY KEY,
            target TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Exact-key lookup
pub async fn get(pool: &SqlitePool, key: &str) -> Result<Lookup, sqlx::Error> {
    let row = sqlx::query_as::<_, CacheRecord>(
        "SELECT key, payload, fetched_at FROM cache WHERE key = $1",
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;
    Ok(row.into())
}

/// Lookup that falls back to the alias table when `key` is not a record key
pub async fn resolve(pool: &SqlitePool, key: &str) -> Result<Lookup, sqlx::Error> {
    let row = sqlx::query_as::<_, CacheRecord>(
        r#"
        SELECT key, payload, fetched_at
        FROM cache
        WHERE key = CASE
            WHEN EXISTS (SELECT 1 FROM cache WHERE key = $1) THEN $1
            ELSE (SELECT target FROM cache_alias WHERE alias = $1)
        END
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;
    Ok(row.into())
}

/// Insert or replace a record.
///
/// The payload is always replaced. The stored `fetched_at` keeps the larger of
/// the old and new values so it never moves backwards, even when the incoming
/// timestamp is behind a row written by a clock that ran ahead.
pub async fn upsert(pool: &SqlitePool, record: &CacheRecord) -> Result<(), sqlx::Error> {
    sqlx::query(UPSERT_RECORD)
        .bind(&record.key)
        .bind(&record.payload)
        .bind(record.fetched_at)
        .execute(pool)
        .await?;
    Ok(())
}

/// Insert or replace a record together with alias keys pointing at it.
///
/// Runs in one transaction: readers see the record and all of its aliases, or
/// none of them. Aliases equal to the record key are skipped.
pub async fn upsert_with_aliases(
    pool: &SqlitePool,
    record: &CacheRecord,
    aliases: &[String],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(UPSERT_RECORD)
        .bind(&record.key)
        .bind(&record.payload)
        .bind(record.fetched_at)
        .execute(&mut *tx)
        .await?;

    for alias in aliases.iter().filter(|a| **a != record.key) {
        sqlx::query(
            r#"
            INSERT INTO cache_alias (alias, target)
            VALUES ($1, $2)
            ON CONFLICT (alias) DO UPDATE SET target = excluded.target
            "#,
        )
        .bind(alias)
        .bind(&record.key)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Number of stored records (aliases are not counted)
pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM cache")
        .fetch_one(pool)
        .await
}

const UPSERT_RECORD: &str = r#"
    INSERT INTO cache (key, payload, fetched_at)
    VALUES ($1, $2, $3)
    ON CONFLICT (key) DO UPDATE SET
        payload = excluded.payload,
        fetched_at = MAX(excluded.fetched_at, cache.fetched_at)
"#;
