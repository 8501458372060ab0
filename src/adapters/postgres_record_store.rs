//! Postgres implementation of RecordStore.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Transaction, TransactionStatus};
use crate::ports::{RecordStore, StoreError, StoreResult};

/// Postgres-backed record store over the `blockchain_transactions` table.
#[derive(Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn save(&self, tx: &Transaction) -> StoreResult<()> {
        let (tx_hash, created_at) = match (&tx.tx_hash, tx.created_at) {
            (Some(hash), Some(at)) => (hash, at),
            _ => {
                return Err(StoreError::Corrupt(format!(
                    "transaction {} was not stamped before save",
                    tx.id
                )))
            }
        };

        sqlx::query(
            r#"
            INSERT INTO blockchain_transactions (
                id, tx_hash, type, amount, description, user_id, reference_id, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(tx.id)
        .bind(tx_hash)
        .bind(tx.kind.as_str())
        .bind(tx.amount)
        .bind(&tx.description)
        .bind(&tx.user_id)
        .bind(&tx.reference_id)
        .bind(tx.status.as_str())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from)?;

        Ok(())
    }

    async fn find_status_by_hash(&self, tx_hash: &str) -> StoreResult<Option<TransactionStatus>> {
        let status = sqlx::query_scalar::<_, String>(
            "SELECT status FROM blockchain_transactions WHERE tx_hash = $1",
        )
        .bind(tx_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from)?;

        status
            .map(|s| s.parse::<TransactionStatus>())
            .transpose()
            .map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::from)?;
        Ok(())
    }
}
