//! Scalar metrics over fetched transactions.

use crate::upstream::Transaction;

/// Count transactions
///
/// **Public** - plain cardinality. Duplicate hashes count separately;
/// the upstream is trusted not to repeat a transaction within one range.
pub fn count_transactions(transactions: &[Transaction]) -> u64 {
    transactions.len() as u64
}
