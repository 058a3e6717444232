//! Transformation from Up transactions to Splitwise expenses.
//!
//! Pure and deterministic: given the category map invariant (the
//! `uncategorized` fallback is always present), [`to_expense`] is a total
//! function of the transaction.

use crate::category::CategoryMap;
use crate::transaction::Transaction;
use serde::Serialize;

/// Currency code of every created expense.
pub const TARGET_CURRENCY: &str = "CAD";

/// Fixed AUD to CAD conversion factor.
///
/// A deliberate approximation standing in for a live exchange rate; adequate
/// for roughly splitting day-to-day purchases.
pub const AUD_TO_CAD_RATE: f64 = 0.9;

/// The create-expense resource accepted by the Splitwise API.
///
/// See <https://dev.splitwise.com/#tag/expenses/paths/~1create_expense/post>
/// for the official resource. Field names are the API's snake_case names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateExpense {
    /// Decimal string amount in the target currency, two decimal places.
    pub cost: String,

    /// Short description shown in the Splitwise feed.
    pub description: String,

    /// Longer free text; empty when the transaction has no raw text.
    pub details: String,

    /// Always `never`; the bridge creates one-off expenses only.
    pub repeat_interval: String,

    pub currency_code: String,

    pub category_id: i64,

    /// The Splitwise group the expense is added to.
    pub group_id: i64,

    pub split_equally: bool,
}

/// Map a transaction into the Splitwise expense shape.
///
/// Only ever called for transactions that passed the relevance filter;
/// the amount is therefore a strictly negative outgoing debit.
pub fn to_expense(transaction: &Transaction, categories: &CategoryMap, group_id: i64) -> CreateExpense {
    CreateExpense {
        cost: convert_to_cad(transaction.attributes.amount.value_in_base_units),
        description: transaction.attributes.description.clone(),
        details: transaction
            .attributes
            .raw_text
            .clone()
            .unwrap_or_default(),
        repeat_interval: "never".to_string(),
        currency_code: TARGET_CURRENCY.to_string(),
        category_id: categories.resolve(transaction.category_id()),
        group_id,
        split_equally: true,
    }
}

/// Convert a minor-unit AUD amount to a CAD decimal string.
///
/// Takes the absolute value, applies [`AUD_TO_CAD_RATE`], rounds to whole
/// cents, and renders with exactly two decimal places. Working in minor
/// units keeps the conversion total; the Up API guarantees the field.
fn convert_to_cad(value_in_base_units: i64) -> String {
    let converted_cents = (value_in_base_units.abs() as f64 * AUD_TO_CAD_RATE).round() as i64;
    format!("{}.{:02}", converted_cents / 100, converted_cents % 100)
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
