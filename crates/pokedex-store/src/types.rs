use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One cached upstream response, keyed by `"<namespace>/<identifier>"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CacheRecord {
    pub key: String,
    /// Upstream body, stored verbatim
    pub payload: String,
    /// Epoch milliseconds of the most recent successful write
    pub fetched_at: i64,
}

impl CacheRecord {
    /// Build a record stamped with the current time
    pub fn new(key: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            payload: payload.into(),
            fetched_at: Utc::now().timestamp_millis(),
        }
    }
}

/// Outcome of a point lookup. Absence is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(CacheRecord),
    Absent,
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn into_record(self) -> Option<CacheRecord> {
        match self {
            Lookup::Found(record) => Some(record),
            Lookup::Absent => None,
        }
    }
}

impl From<Option<CacheRecord>> for Lookup {
    fn from(row: Option<CacheRecord>) -> Self {
        row.map_or(Lookup::Absent, Lookup::Found)
    }
}
