//! Webhook event payload model and classification.
//!
//! Models the webhook event resource delivered by Up
//! (`POST` callback, see <https://developer.up.com.au/#callback_post_webhookURL>)
//! and classifies it into the event kinds the pipeline cares about.

use crate::BridgeError;
use chrono::{DateTime, Utc};
use serde::Deserialize;

// ============================================================================
// Wire Types
// ============================================================================

/// Top-level webhook body; Up nests the event resource under `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEventEnvelope {
    pub data: WebhookEvent,
}

/// A single webhook event resource.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Resource type discriminator, always `webhook-events`.
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Unique identifier of the event.
    pub id: String,

    pub attributes: WebhookEventAttributes,

    #[serde(default)]
    pub relationships: WebhookEventRelationships,
}

/// Event attributes carrying the declared event type.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEventAttributes {
    /// Declared event type, e.g. `TRANSACTION_CREATED`.
    #[serde(rename = "eventType")]
    pub event_type: String,

    /// When the event occurred on Up's side.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Relationships block; only the transaction reference is of interest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookEventRelationships {
    /// Present on transaction events, absent on pings.
    #[serde(default)]
    pub transaction: Option<TransactionRelationship>,
}

/// Reference to the transaction a webhook event is about.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRelationship {
    pub data: ResourceIdentifier,
}

/// Minimal `{type, id}` resource identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
}

// ============================================================================
// Classification
// ============================================================================

/// The kinds of webhook events the bridge distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Connectivity check sent when a webhook is registered or pinged.
    Ping,
    /// A new transaction appeared; the only kind that creates an expense.
    TransactionCreated,
    /// A held transaction settled.
    TransactionSettled,
    /// A transaction was removed.
    TransactionDeleted,
    /// Any event type this version does not recognize.
    Other,
}

impl WebhookEvent {
    /// Decode a webhook event from the raw request body.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Payload`] when the body is not a well-formed
    /// webhook event envelope.
    pub fn from_body(raw_body: &[u8]) -> Result<Self, BridgeError> {
        let envelope: WebhookEventEnvelope =
            serde_json::from_slice(raw_body).map_err(|e| BridgeError::Payload {
                message: e.to_string(),
            })?;
        Ok(envelope.data)
    }

    /// Classify the event from its declared event type.
    ///
    /// Pure mapping; unrecognized values yield [`EventKind::Other`], never
    /// an error.
    pub fn kind(&self) -> EventKind {
        match self.attributes.event_type.as_str() {
            "PING" => EventKind::Ping,
            "TRANSACTION_CREATED" => EventKind::TransactionCreated,
            "TRANSACTION_SETTLED" => EventKind::TransactionSettled,
            "TRANSACTION_DELETED" => EventKind::TransactionDeleted,
            _ => EventKind::Other,
        }
    }

    /// Get the id of the transaction this event refers to.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::MissingTransactionRef`] when the event carries
    /// no transaction relationship. Callers must only invoke this for
    /// transaction events; a missing reference on a creation event is a
    /// contract violation by the sender.
    pub fn transaction_id(&self) -> Result<&str, BridgeError> {
        self.relationships
            .transaction
            .as_ref()
            .map(|rel| rel.data.id.as_str())
            .ok_or(BridgeError::MissingTransactionRef)
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
