use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::domain::{DomainError, Transaction, TransactionKind, TransactionStatus};
use crate::ledger;
use crate::ports::{RecordStore, StoreError, StoreResult};

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Transaction {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Anchors transactions on the (mocked) ledger and records them.
#[derive(Clone)]
pub struct TransactionService {
    store: Arc<dyn RecordStore>,
    store_timeout: Duration,
}

impl TransactionService {
    pub fn new(store: Arc<dyn RecordStore>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    pub async fn trade(&self, tx: Transaction) -> Result<String, ServiceError> {
        self.submit(TransactionKind::Trade, tx).await
    }

    pub async fn pay(&self, tx: Transaction) -> Result<String, ServiceError> {
        self.submit(TransactionKind::Pay, tx).await
    }

    pub async fn anchor_receipt(&self, tx: Transaction) -> Result<String, ServiceError> {
        self.submit(TransactionKind::AnchorReceipt, tx).await
    }

    /// Hashes, stamps and persists one transaction, returning its hash.
    ///
    /// Every call writes a new record; a store failure is returned as-is and
    /// nothing is retried.
    pub async fn submit(
        &self,
        kind: TransactionKind,
        mut tx: Transaction,
    ) -> Result<String, ServiceError> {
        tx.kind = kind;
        let tx_hash = ledger::generate_tx_hash(kind, tx.amount, ledger::now_nanos());
        tx.confirm(tx_hash.clone(), Utc::now())?;

        if let Err(e) = self.with_timeout(self.store.save(&tx)).await {
            tracing::error!(tx_hash = %tx_hash, kind = %kind, error = %e, "Failed to save transaction");
            return Err(e.into());
        }

        tracing::info!(tx_hash = %tx_hash, kind = %kind, amount = tx.amount, "Transaction anchored");
        Ok(tx_hash)
    }

    pub async fn get_status(&self, tx_hash: &str) -> Result<TransactionStatus, ServiceError> {
        let status = self
            .with_timeout(self.store.find_status_by_hash(tx_hash))
            .await
            .map_err(|e| {
                tracing::error!(tx_hash = %tx_hash, error = %e, "Status lookup failed");
                e
            })?;

        status.ok_or_else(|| ServiceError::NotFound(tx_hash.to_string()))
    }

    pub async fn ping_store(&self) -> Result<(), ServiceError> {
        self.with_timeout(self.store.ping()).await?;
        Ok(())
    }

    async fn with_timeout<T>(&self, call: impl Future<Output = StoreResult<T>>) -> StoreResult<T> {
        tokio::time::timeout(self.store_timeout, call)
            .await
            .map_err(|_| StoreError::Timeout(self.store_timeout))?
    }
}
