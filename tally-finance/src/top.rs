//! Largest settled transactions

use tally_core::Transaction;

pub const TOP_N: usize = 5;

/// The `n` largest settled transactions by amount, descending.
/// Equal amounts keep their input order.
pub fn top_transactions(txns: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut settled: Vec<Transaction> = txns.iter().filter(|t| t.is_settled()).cloned().collect();
    // stable sort
    settled.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    settled.truncate(n);
    tracing::info!(count = settled.len(), "top transactions by amount selected");
    settled
}

pub fn top_five(txns: &[Transaction]) -> Vec<Transaction> {
    top_transactions(txns, TOP_N)
}
