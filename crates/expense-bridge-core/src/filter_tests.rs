//! Tests for the relevance filter.

use super::*;
use crate::event::ResourceIdentifier;
use crate::transaction::{
    Money, NullableRelationship, Transaction, TransactionAttributes, TransactionRelationships,
};

// ============================================================================
// Helpers
// ============================================================================

fn transaction(description: &str, value_in_base_units: i64, transfer: bool) -> Transaction {
    let value = format!("{:.2}", value_in_base_units as f64 / 100.0);
    Transaction {
        resource_type: "transactions".to_string(),
        id: "txn-1".to_string(),
        attributes: TransactionAttributes {
            description: description.to_string(),
            raw_text: None,
            amount: Money {
                currency_code: "AUD".to_string(),
                value,
                value_in_base_units,
            },
        },
        relationships: TransactionRelationships {
            transfer_account: NullableRelationship {
                data: transfer.then(|| ResourceIdentifier {
                    resource_type: "accounts".to_string(),
                    id: "acc-1".to_string(),
                }),
            },
            category: NullableRelationship { data: None },
        },
    }
}

fn denylist() -> Vec<String> {
    vec!["description 1".to_string(), "description 2".to_string()]
}

// ============================================================================
// is_ignorable tests
// ============================================================================

/// An outgoing purchase with a clean description passes the filter.
#[test]
fn test_outgoing_purchase_is_not_ignorable() {
    let t = transaction("Groceries", -2000, false);

    assert!(!is_ignorable(&t, &denylist()));
}

/// A denylisted description is ignorable regardless of case.
#[test]
fn test_denylisted_description_is_ignorable() {
    let exact = transaction("description 1", -2000, false);
    let mixed_case = transaction("Description 1", -2000, false);

    assert!(is_ignorable(&exact, &denylist()));
    assert!(is_ignorable(&mixed_case, &denylist()));
}

/// Credits and refunds (minor units >= 0) are ignorable.
#[test]
fn test_credit_is_ignorable() {
    let credit = transaction("Refund", 1500, false);
    let zero = transaction("Zero-value hold", 0, false);

    assert!(is_ignorable(&credit, &denylist()));
    assert!(is_ignorable(&zero, &denylist()));
}

/// An internal transfer is ignorable regardless of amount or description.
#[test]
fn test_transfer_is_ignorable() {
    let t = transaction("Transfer to Savings", -10000, true);

    assert!(is_ignorable(&t, &denylist()));
}

/// Each rule fires independently: a credit with a clean description and no
/// transfer account is still ignorable.
#[test]
fn test_credit_ignorable_regardless_of_other_fields() {
    let t = transaction("Groceries", 1500, false);

    assert!(is_ignorable(&t, &denylist()));
}

/// An empty denylist disables the description rule only.
#[test]
fn test_empty_denylist_only_disables_description_rule() {
    let listed = transaction("description 1", -2000, false);
    let credit = transaction("description 1", 1500, false);

    assert!(!is_ignorable(&listed, &[]));
    assert!(is_ignorable(&credit, &[]));
}
