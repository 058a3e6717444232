//! Transaction resource model from the Up API.
//!
//! Partial model of the transaction resource returned by
//! `GET /transactions/{id}` (see <https://developer.up.com.au/#get_transactions_id>),
//! limited to the fields the bridge reads.

use crate::event::ResourceIdentifier;
use serde::Deserialize;

/// Response wrapper; the Up API nests the resource under `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionEnvelope {
    pub data: Transaction,
}

/// A single bank transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    /// Resource type discriminator, always `transactions`.
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Unique identifier of the transaction.
    pub id: String,

    pub attributes: TransactionAttributes,

    pub relationships: TransactionRelationships,
}

/// The transaction fields the filter and transformer read.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionAttributes {
    /// Short human-readable description, usually the merchant name.
    pub description: String,

    /// The raw unprocessed statement text, when the bank provides one.
    #[serde(rename = "rawText")]
    pub raw_text: Option<String>,

    pub amount: Money,
}

/// A monetary amount as the Up API represents it.
#[derive(Debug, Clone, Deserialize)]
pub struct Money {
    /// ISO 4217 currency code, e.g. `AUD`.
    #[serde(rename = "currencyCode")]
    pub currency_code: String,

    /// Decimal string value, e.g. `"-20.00"`.
    pub value: String,

    /// Amount in minor units (cents). Outgoing spend is negative;
    /// comparisons use this field to avoid floating point.
    #[serde(rename = "valueInBaseUnits")]
    pub value_in_base_units: i64,
}

/// Relationship block of a transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRelationships {
    /// Non-null only for internal transfers between the user's own accounts.
    #[serde(rename = "transferAccount")]
    pub transfer_account: NullableRelationship,

    /// Up merchant category, null when the transaction is uncategorized.
    pub category: NullableRelationship,
}

/// A to-one relationship whose `data` may be null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NullableRelationship {
    pub data: Option<ResourceIdentifier>,
}

impl Transaction {
    /// Whether this transaction is an internal transfer between the user's
    /// own accounts.
    pub fn is_transfer(&self) -> bool {
        self.relationships.transfer_account.data.is_some()
    }

    /// Up category id of this transaction, if categorized.
    pub fn category_id(&self) -> Option<&str> {
        self.relationships
            .category
            .data
            .as_ref()
            .map(|identifier| identifier.id.as_str())
    }
}

#[cfg(test)]
#[path = "transaction_tests.rs"]
mod tests;
