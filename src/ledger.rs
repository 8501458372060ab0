//! Mocked ledger.
//!
//! No distributed ledger is contacted. A submission is "anchored" by deriving a
//! SHA-256 digest from its kind, amount and submission instant. Swapping in a
//! real ledger client only touches this module and the transaction service.

use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::TransactionKind;

/// Length of a hex-encoded SHA-256 digest.
pub const TX_HASH_LEN: usize = 64;

/// Derives the ledger hash for a submission.
///
/// Deterministic for identical inputs; callers pass [`now_nanos`] so repeated
/// submissions of the same kind and amount still get distinct hashes.
pub fn generate_tx_hash(kind: TransactionKind, amount: i64, timestamp_nanos: u128) -> String {
    let data = format!("{}-{}-{}", kind, amount, timestamp_nanos);
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hex::encode(hasher.finalize())
}

/// Wall-clock nanoseconds since the Unix epoch.
pub fn now_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
}

pub fn is_tx_hash(candidate: &str) -> bool {
    candidate.len() == TX_HASH_LEN
        && candidate
            .chars()
            .all(|ch| ch.is_ascii_digit() || ('a'..='f').contains(&ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_64_lowercase_hex() {
        let hash = generate_tx_hash(TransactionKind::Trade, 100, now_nanos());
        assert_eq!(hash.len(), TX_HASH_LEN);
        assert!(is_tx_hash(&hash));
    }

    #[test]
    fn test_hash_is_deterministic() {
        let a = generate_tx_hash(TransactionKind::Pay, 5, 1_700_000_000_000_000_000);
        let b = generate_tx_hash(TransactionKind::Pay, 5, 1_700_000_000_000_000_000);
        assert_eq!(a, b);
    }

    #[test]
    fn test_hash_matches_known_digest() {
        // sha256("trade-0-0")
        let expected = {
            let mut hasher = Sha256::new();
            hasher.update(b"trade-0-0");
            hex::encode(hasher.finalize())
        };
        assert_eq!(generate_tx_hash(TransactionKind::Trade, 0, 0), expected);
    }

    #[test]
    fn test_hash_differs_across_instants() {
        let a = generate_tx_hash(TransactionKind::AnchorReceipt, 7, 1);
        let b = generate_tx_hash(TransactionKind::AnchorReceipt, 7, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_differs_across_kinds() {
        let a = generate_tx_hash(TransactionKind::Trade, 7, 1);
        let b = generate_tx_hash(TransactionKind::Pay, 7, 1);
        assert_ne!(a, b);
    }

    #[test]
    fn test_is_tx_hash_rejects_uppercase_and_short() {
        assert!(!is_tx_hash("ABC"));
        assert!(!is_tx_hash(&"A".repeat(TX_HASH_LEN)));
        assert!(is_tx_hash(&"a".repeat(TX_HASH_LEN)));
    }
}
