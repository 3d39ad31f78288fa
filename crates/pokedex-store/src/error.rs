//! Error types for the durable store

use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    /// The store could not be opened at the configured location
    Init(String),
    /// A single read or write failed in the storage engine
    Io(Box<sqlx::Error>),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Init(msg) => write!(f, "Store init error: {}", msg),
            StoreError::Io(err) => write!(f, "Store I/O error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err.as_ref()),
            StoreError::Init(_) => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Io(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
