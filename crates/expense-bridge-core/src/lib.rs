//! # Expense Bridge Core
//!
//! Domain logic for bridging Up banking webhooks to Splitwise expenses.
//!
//! The crate implements the full decision pipeline that turns an inbound
//! webhook payload into a `create_expense` call against Splitwise:
//! signature verification, event classification, relevance filtering,
//! currency conversion, and category mapping.
//!
//! ## Architecture
//!
//! Business logic depends only on trait abstractions: the two outbound
//! collaborators (the Up API read and the Splitwise API write) are modeled
//! as the [`TransactionSource`] and [`ExpenseSink`] traits and injected into
//! the [`WebhookPipeline`] at startup. Concrete HTTP implementations live in
//! the service crate.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Domain Identifier Types
// ============================================================================

/// Identifier assigned by Splitwise to a created expense.
///
/// Splitwise returns the id as a JSON number; it is carried as a string
/// because the bridge never does arithmetic on it and the webhook response
/// echoes it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Create an expense id from its string representation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Failure while reading a transaction from the Up API.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network-level failure before an HTTP response was received.
    #[error("Transport error contacting Up API: {message}")]
    Transport { message: String },

    /// The Up API answered with a non-success status code.
    #[error("Up API returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded as a transaction resource.
    #[error("Failed to decode Up API response: {message}")]
    Decode { message: String },
}

/// Failure while creating an expense via the Splitwise API.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Network-level failure before an HTTP response was received.
    #[error("Transport error contacting Splitwise API: {message}")]
    Transport { message: String },

    /// The Splitwise API answered with a non-success status code.
    #[error("Splitwise API returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded as a create-expense response.
    #[error("Failed to decode Splitwise API response: {message}")]
    Decode { message: String },

    /// The API accepted the request but returned no created expenses.
    #[error("Splitwise API returned an empty expense list")]
    EmptyResponse,
}

/// Top-level error type for the webhook pipeline.
///
/// Every variant maps to the generic 500 response at the HTTP boundary.
/// Expected no-op cases (unauthenticated request, ping, ignorable
/// transaction, ...) are not errors; they are [`pipeline::PipelineOutcome`]
/// values.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The request body could not be decoded as a webhook event.
    #[error("Failed to decode webhook payload: {message}")]
    Payload { message: String },

    /// A transaction event arrived without a transaction relationship.
    ///
    /// This is a contract violation by the sender, not a legitimate
    /// non-transaction event; it is kept distinct so it routes to the
    /// generic-failure path instead of being conflated with a ping.
    #[error("Webhook event carries no transaction reference")]
    MissingTransactionRef,

    /// The transaction fetch from the Up API failed.
    #[error("Transaction fetch failed: {0}")]
    Source(#[from] SourceError),

    /// The expense submission to the Splitwise API failed.
    #[error("Expense submission failed: {0}")]
    Sink(#[from] SinkError),
}

// ============================================================================
// Module declarations
// ============================================================================

/// Category mapping from Up category ids to Splitwise category ids.
pub mod category;

/// Webhook event payload model and classification.
pub mod event;

/// Relevance filter deciding which transactions become expenses.
pub mod filter;

/// Orchestration pipeline sequencing the full webhook handling flow.
pub mod pipeline;

/// Secret material wrapper with redacted debug output.
pub mod secret;

/// Webhook signature verification.
pub mod signature;

/// Transaction resource model from the Up API.
pub mod transaction;

/// Transformation from transactions to Splitwise expenses.
pub mod transform;

// Re-export key types for convenience
pub use category::{CategoryMap, CategoryMapError};
pub use event::{EventKind, WebhookEvent};
pub use filter::is_ignorable;
pub use pipeline::{
    ExpenseSink, PipelineConfig, PipelineOutcome, TransactionSource, WebhookPipeline,
};
pub use secret::SecretString;
pub use signature::is_authentic_request;
pub use transaction::{Money, Transaction};
pub use transform::{to_expense, CreateExpense};
