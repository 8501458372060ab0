//! Ports the core depends on.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::domain::{Transaction, TransactionStatus};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    #[error("Record store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Stored record is corrupt: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable home for transaction records.
///
/// Implementations must be safe to share across request tasks.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Writes one record. A record without a hash is never passed in.
    async fn save(&self, tx: &Transaction) -> StoreResult<()>;

    /// Point lookup by the unique hash. `Ok(None)` when no record matches.
    async fn find_status_by_hash(&self, tx_hash: &str) -> StoreResult<Option<TransactionStatus>>;

    /// Cheap connectivity check for health probes.
    async fn ping(&self) -> StoreResult<()>;
}
