//! Relevance filter deciding which transactions become expenses.
//!
//! Three independent rules make a transaction ignorable; any single match
//! excludes it from expense creation:
//!
//! 1. its description matches an entry in the configured denylist
//!    (case-insensitive);
//! 2. its minor-unit amount is zero or positive, meaning a credit or refund
//!    rather than outgoing spend (outgoing spend is negative);
//! 3. it carries a transfer-account reference, meaning an internal transfer
//!    between the user's own accounts rather than a purchase.

use crate::transaction::Transaction;
use tracing::debug;

/// Check whether a transaction must not generate an expense.
///
/// The three rules are independent OR conditions; evaluation short-circuits
/// on the first match.
pub fn is_ignorable(transaction: &Transaction, ignored_descriptions: &[String]) -> bool {
    let description = transaction.attributes.description.to_lowercase();
    if ignored_descriptions
        .iter()
        .any(|entry| entry.to_lowercase() == description)
    {
        debug!(
            transaction_id = %transaction.id,
            "Transaction description is denylisted"
        );
        return true;
    }

    if transaction.attributes.amount.value_in_base_units >= 0 {
        debug!(
            transaction_id = %transaction.id,
            "Transaction is a credit or refund"
        );
        return true;
    }

    if transaction.is_transfer() {
        debug!(
            transaction_id = %transaction.id,
            "Transaction is an internal transfer"
        );
        return true;
    }

    false
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
