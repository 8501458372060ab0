//! Transaction domain entity.
//! Framework-agnostic representation of one ledger operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Transaction {0} already carries a hash")]
    HashAlreadyAssigned(Uuid),

    #[error("Illegal status transition from {from} to {to}")]
    IllegalTransition {
        from: TransactionStatus,
        to: TransactionStatus,
    },

    #[error("Unknown transaction kind: {0}")]
    UnknownKind(String),

    #[error("Unknown transaction status: {0}")]
    UnknownStatus(String),
}

/// The operation a transaction records on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionKind {
    Trade,
    Pay,
    AnchorReceipt,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Trade => "trade",
            TransactionKind::Pay => "pay",
            TransactionKind::AnchorReceipt => "anchor-receipt",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trade" => Ok(TransactionKind::Trade),
            "pay" => Ok(TransactionKind::Pay),
            "anchor-receipt" => Ok(TransactionKind::AnchorReceipt),
            other => Err(DomainError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Confirmed => "confirmed",
            TransactionStatus::Failed => "failed",
        }
    }

    /// Status only moves forward; confirmed and failed are terminal.
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        matches!(
            (self, next),
            (TransactionStatus::Pending, TransactionStatus::Confirmed)
                | (TransactionStatus::Pending, TransactionStatus::Failed)
        )
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "confirmed" => Ok(TransactionStatus::Confirmed),
            "failed" => Ok(TransactionStatus::Failed),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// Domain entity representing a transaction.
///
/// `tx_hash` and `created_at` stay empty until [`Transaction::confirm`] runs,
/// which happens once, right before the record is first persisted.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: Uuid,
    pub tx_hash: Option<String>,
    pub kind: TransactionKind,
    pub amount: i64,
    pub description: Option<String>,
    pub user_id: Option<String>,
    pub reference_id: Option<String>,
    pub status: TransactionStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount: i64, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tx_hash: None,
            kind,
            amount,
            description,
            user_id: None,
            reference_id: None,
            status: TransactionStatus::Pending,
            created_at: None,
        }
    }

    pub fn with_user_id(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_reference_id(mut self, reference_id: Option<String>) -> Self {
        self.reference_id = reference_id;
        self
    }

    /// Stamps the ledger hash and creation time and marks the record confirmed.
    pub fn confirm(&mut self, tx_hash: String, at: DateTime<Utc>) -> Result<(), DomainError> {
        if self.tx_hash.is_some() {
            return Err(DomainError::HashAlreadyAssigned(self.id));
        }
        if !self.status.can_transition_to(TransactionStatus::Confirmed) {
            return Err(DomainError::IllegalTransition {
                from: self.status,
                to: TransactionStatus::Confirmed,
            });
        }

        self.tx_hash = Some(tx_hash);
        self.created_at = Some(at);
        self.status = TransactionStatus::Confirmed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transaction_is_pending_without_hash() {
        let tx = Transaction::new(TransactionKind::Pay, 42, None);
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert!(tx.tx_hash.is_none());
        assert!(tx.created_at.is_none());
    }

    #[test]
    fn test_confirm_assigns_hash_once() {
        let mut tx = Transaction::new(TransactionKind::Trade, 10, Some("swap".to_string()));
        let now = Utc::now();
        tx.confirm("abc".to_string(), now).unwrap();

        assert_eq!(tx.tx_hash.as_deref(), Some("abc"));
        assert_eq!(tx.created_at, Some(now));
        assert_eq!(tx.status, TransactionStatus::Confirmed);

        let err = tx.confirm("def".to_string(), Utc::now()).unwrap_err();
        assert_eq!(err, DomainError::HashAlreadyAssigned(tx.id));
        assert_eq!(tx.tx_hash.as_deref(), Some("abc"));
    }

    #[test]
    fn test_confirm_rejects_failed_transaction() {
        let mut tx = Transaction::new(TransactionKind::Pay, 1, None);
        tx.status = TransactionStatus::Failed;

        let err = tx.confirm("abc".to_string(), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::IllegalTransition { .. }));
    }

    #[test]
    fn test_status_moves_forward_only() {
        assert!(TransactionStatus::Pending.can_transition_to(TransactionStatus::Confirmed));
        assert!(TransactionStatus::Pending.can_transition_to(TransactionStatus::Failed));
        assert!(!TransactionStatus::Confirmed.can_transition_to(TransactionStatus::Pending));
        assert!(!TransactionStatus::Confirmed.can_transition_to(TransactionStatus::Failed));
        assert!(!TransactionStatus::Failed.can_transition_to(TransactionStatus::Confirmed));
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(TransactionKind::AnchorReceipt.as_str(), "anchor-receipt");
        assert_eq!(
            "anchor-receipt".parse::<TransactionKind>().unwrap(),
            TransactionKind::AnchorReceipt
        );
        assert_eq!(
            serde_json::to_string(&TransactionKind::AnchorReceipt).unwrap(),
            "\"anchor-receipt\""
        );
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "confirmed".parse::<TransactionStatus>().unwrap(),
            TransactionStatus::Confirmed
        );
        assert_eq!(
            "CONFIRMED".parse::<TransactionStatus>().unwrap_err(),
            DomainError::UnknownStatus("CONFIRMED".to_string())
        );
    }
}
