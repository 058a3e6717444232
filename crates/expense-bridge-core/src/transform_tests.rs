//! Tests for the expense transformation.

use super::*;
use crate::event::ResourceIdentifier;
use crate::transaction::{
    Money, NullableRelationship, Transaction, TransactionAttributes, TransactionRelationships,
};

// ============================================================================
// Helpers
// ============================================================================

fn transaction(
    description: &str,
    value_in_base_units: i64,
    category: Option<&str>,
    raw_text: Option<&str>,
) -> Transaction {
    let value = format!("{:.2}", value_in_base_units as f64 / 100.0);
    Transaction {
        resource_type: "transactions".to_string(),
        id: "txn-1".to_string(),
        attributes: TransactionAttributes {
            description: description.to_string(),
            raw_text: raw_text.map(str::to_string),
            amount: Money {
                currency_code: "AUD".to_string(),
                value,
                value_in_base_units,
            },
        },
        relationships: TransactionRelationships {
            transfer_account: NullableRelationship { data: None },
            category: NullableRelationship {
                data: category.map(|id| ResourceIdentifier {
                    resource_type: "categories".to_string(),
                    id: id.to_string(),
                }),
            },
        },
    }
}

// ============================================================================
// to_expense tests
// ============================================================================

/// The worked example: a -20.00 AUD groceries purchase with no raw text.
#[test]
fn test_groceries_purchase_example() {
    let t = transaction("Groceries", -2000, Some("groceries"), None);
    let expense = to_expense(&t, &CategoryMap::default_mapping(), 12345678);

    assert_eq!(expense.cost, "18.00");
    assert_eq!(expense.description, "Groceries");
    assert_eq!(expense.details, "");
    assert_eq!(expense.repeat_interval, "never");
    assert_eq!(expense.currency_code, "CAD");
    assert_eq!(expense.category_id, 12);
    assert_eq!(expense.group_id, 12345678);
    assert!(expense.split_equally);
}

/// The transformation is deterministic.
#[test]
fn test_to_expense_is_deterministic() {
    let t = transaction("Cafe", -1250, Some("restaurants-and-cafes"), Some("CAFE 42"));
    let map = CategoryMap::default_mapping();

    assert_eq!(to_expense(&t, &map, 1), to_expense(&t, &map, 1));
}

/// Raw text is carried into details when present.
#[test]
fn test_raw_text_becomes_details() {
    let t = transaction("Groceries", -2000, None, Some("GROCER PTY LTD SYDNEY"));
    let expense = to_expense(&t, &CategoryMap::default_mapping(), 1);

    assert_eq!(expense.details, "GROCER PTY LTD SYDNEY");
}

/// A null category resolves to the uncategorized mapping entry.
#[test]
fn test_null_category_uses_fallback() {
    let map = CategoryMap::default_mapping();
    let uncategorized = transaction("Mystery", -500, None, None);
    let explicit = transaction("Mystery", -500, Some("uncategorized"), None);

    assert_eq!(
        to_expense(&uncategorized, &map, 1).category_id,
        to_expense(&explicit, &map, 1).category_id
    );
}

/// Conversion rounds to whole cents: 12.34 AUD * 0.9 = 11.106 -> "11.11".
#[test]
fn test_cost_rounds_to_two_decimals() {
    let t = transaction("Cafe", -1234, None, None);
    let expense = to_expense(&t, &CategoryMap::default_mapping(), 1);

    assert_eq!(expense.cost, "11.11");
}

/// Sub-dollar amounts render with a leading zero cents field.
#[test]
fn test_sub_dollar_amount_renders_two_digits() {
    let t = transaction("Gum", -50, None, None);
    let expense = to_expense(&t, &CategoryMap::default_mapping(), 1);

    assert_eq!(expense.cost, "0.45");
}

// ============================================================================
// Serialization tests
// ============================================================================

/// The outbound JSON uses the Splitwise API's snake_case field names.
#[test]
fn test_serializes_with_api_field_names() {
    let t = transaction("Groceries", -2000, Some("groceries"), None);
    let expense = to_expense(&t, &CategoryMap::default_mapping(), 12345678);
    let json = serde_json::to_value(&expense).unwrap();

    assert_eq!(json["cost"], "18.00");
    assert_eq!(json["repeat_interval"], "never");
    assert_eq!(json["currency_code"], "CAD");
    assert_eq!(json["category_id"], 12);
    assert_eq!(json["group_id"], 12345678);
    assert_eq!(json["split_equally"], true);
}
