pub mod transaction_service;

pub use transaction_service::{ServiceError, TransactionService, DEFAULT_STORE_TIMEOUT};
