//! In-process RecordStore, used for local runs and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::{Transaction, TransactionStatus};
use crate::ports::{RecordStore, StoreError, StoreResult};

#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<String, Transaction>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn get(&self, tx_hash: &str) -> Option<Transaction> {
        self.records.read().await.get(tx_hash).cloned()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn save(&self, tx: &Transaction) -> StoreResult<()> {
        let tx_hash = tx
            .tx_hash
            .clone()
            .ok_or_else(|| StoreError::Corrupt(format!("transaction {} has no hash", tx.id)))?;

        let mut records = self.records.write().await;
        if records.contains_key(&tx_hash) {
            return Err(StoreError::Unavailable(format!(
                "duplicate tx_hash {}",
                tx_hash
            )));
        }
        records.insert(tx_hash, tx.clone());
        Ok(())
    }

    async fn find_status_by_hash(&self, tx_hash: &str) -> StoreResult<Option<TransactionStatus>> {
        Ok(self.records.read().await.get(tx_hash).map(|tx| tx.status))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
