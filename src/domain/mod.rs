pub mod transaction;

pub use transaction::{DomainError, Transaction, TransactionKind, TransactionStatus};
