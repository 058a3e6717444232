//! Orchestration pipeline sequencing the full webhook handling flow.
//!
//! One invocation runs strictly linearly:
//! verify -> parse -> classify -> fetch -> filter -> transform -> submit.
//! There is no branching into parallel work and no state between
//! invocations; the category map and configuration are read-only after
//! startup.
//!
//! Expected short-circuits (unauthenticated request, ping, non-creation
//! event, ignorable transaction) are [`PipelineOutcome`] values, not errors.
//! Everything else surfaces as a [`BridgeError`] for the HTTP layer to map
//! to the generic failure response.

use crate::category::CategoryMap;
use crate::event::{EventKind, WebhookEvent};
use crate::filter::is_ignorable;
use crate::secret::SecretString;
use crate::signature::is_authentic_request;
use crate::transaction::Transaction;
use crate::transform::{to_expense, CreateExpense};
use crate::{BridgeError, ExpenseId, SinkError, SourceError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

// ============================================================================
// Collaborator Traits
// ============================================================================

/// Outbound read against the source banking API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch the full transaction record for a webhook event.
    ///
    /// # Errors
    ///
    /// Any transport, status, or decode failure propagates as a
    /// [`SourceError`]; the pipeline performs no retries.
    async fn fetch_transaction(&self, id: &str) -> Result<Transaction, SourceError>;
}

/// Outbound write against the target bill-splitting API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExpenseSink: Send + Sync {
    /// Submit an expense and return the identifier assigned to it.
    ///
    /// # Errors
    ///
    /// Any transport, status, or decode failure propagates as a
    /// [`SinkError`]; the pipeline performs no retries.
    async fn create_expense(&self, expense: &CreateExpense) -> Result<ExpenseId, SinkError>;
}

// ============================================================================
// Pipeline
// ============================================================================

/// Every way a webhook invocation can conclude without failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Signature verification failed; the request was not processed.
    NotAuthentic,
    /// The request carried no body.
    NoBody,
    /// A ping event was acknowledged.
    Pinged,
    /// A recognized but non-creation event (settled, deleted, unknown).
    NotCreation,
    /// The transaction was fetched but is not a relevant purchase.
    Ignored,
    /// An expense was created with the given identifier.
    Created(ExpenseId),
}

/// Static inputs of the pipeline, fixed at startup.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Shared secret for webhook signature verification.
    pub webhook_secret: SecretString,

    /// Denylisted transaction descriptions, matched case-insensitively.
    pub ignored_descriptions: Vec<String>,

    /// Up-to-Splitwise category mapping.
    pub categories: CategoryMap,

    /// Splitwise group expenses are added to.
    pub group_id: i64,
}

/// The webhook processing pipeline.
///
/// Holds the read-only configuration and the two outbound collaborators
/// behind trait objects so tests can substitute them.
pub struct WebhookPipeline {
    config: PipelineConfig,
    source: Arc<dyn TransactionSource>,
    sink: Arc<dyn ExpenseSink>,
}

impl WebhookPipeline {
    /// Assemble a pipeline from configuration and collaborators.
    pub fn new(
        config: PipelineConfig,
        source: Arc<dyn TransactionSource>,
        sink: Arc<dyn ExpenseSink>,
    ) -> Self {
        Self {
            config,
            source,
            sink,
        }
    }

    /// Process one webhook delivery.
    ///
    /// `raw_body` must be the body bytes exactly as received; signature
    /// verification depends on them being unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError`] for payload decode failures, a missing
    /// transaction reference on a creation event, and collaborator
    /// failures. All of them map to the generic 500 response.
    #[instrument(skip(self, raw_body, signature))]
    pub async fn process(
        &self,
        raw_body: &[u8],
        signature: Option<&str>,
    ) -> Result<PipelineOutcome, BridgeError> {
        if !is_authentic_request(raw_body, signature, &self.config.webhook_secret) {
            info!("Rejecting webhook that failed signature verification");
            return Ok(PipelineOutcome::NotAuthentic);
        }

        if raw_body.is_empty() {
            return Ok(PipelineOutcome::NoBody);
        }

        let event = WebhookEvent::from_body(raw_body)?;

        match event.kind() {
            EventKind::Ping => {
                info!(event_id = %event.id, "Acknowledged webhook ping");
                return Ok(PipelineOutcome::Pinged);
            }
            EventKind::TransactionCreated => {}
            _ => {
                info!(
                    event_id = %event.id,
                    event_type = %event.attributes.event_type,
                    "Discarding non-creation event"
                );
                return Ok(PipelineOutcome::NotCreation);
            }
        }

        let transaction_id = event.transaction_id()?;
        let transaction = self.source.fetch_transaction(transaction_id).await?;

        if is_ignorable(&transaction, &self.config.ignored_descriptions) {
            info!(transaction_id = %transaction.id, "Ignoring irrelevant transaction");
            return Ok(PipelineOutcome::Ignored);
        }

        let expense = self.expense_for(&transaction);
        let expense_id = self.sink.create_expense(&expense).await?;

        info!(
            transaction_id = %transaction.id,
            expense_id = %expense_id,
            cost = %expense.cost,
            "Created expense from transaction"
        );

        Ok(PipelineOutcome::Created(expense_id))
    }

    /// Build the outbound expense for a transaction that passed the filter.
    fn expense_for(&self, transaction: &Transaction) -> CreateExpense {
        to_expense(transaction, &self.config.categories, self.config.group_id)
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
