//! HTTP client for the Splitwise API.
//!
//! Implements the [`ExpenseSink`] seam of the pipeline with a `reqwest`
//! client: one authenticated write, `POST {base_url}/create_expense`.

use crate::config::{ConfigError, SplitwiseConfig};
use async_trait::async_trait;
use expense_bridge_core::{CreateExpense, ExpenseId, ExpenseSink, SinkError};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use tracing::{debug, instrument};

// ============================================================================
// Wire Types
// ============================================================================

/// Response body of `POST /create_expense`.
///
/// See <https://dev.splitwise.com/#tag/expenses/paths/~1create_expense/post>.
#[derive(Debug, Deserialize)]
struct CreateExpenseResponse {
    expenses: Vec<CreatedExpense>,
}

#[derive(Debug, Deserialize)]
struct CreatedExpense {
    #[serde(deserialize_with = "id_as_string")]
    id: String,
}

/// Splitwise has returned expense ids as both JSON numbers and strings
/// across API revisions; accept either.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
    })
}

// ============================================================================
// Client
// ============================================================================

/// Authenticated client for the Splitwise API.
#[derive(Debug, Clone)]
pub struct SplitwiseClient {
    http: reqwest::Client,
    base_url: String,
}

impl SplitwiseClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the API key cannot be used as a
    /// header value or the underlying HTTP client cannot be constructed.
    pub fn new(config: &SplitwiseConfig) -> Result<Self, ConfigError> {
        let mut auth_value =
            HeaderValue::from_str(&format!("Bearer {}", config.api_key.expose_secret())).map_err(
                |_| ConfigError::Invalid {
                    message: "splitwise.api_key contains characters not valid in a header"
                        .to_string(),
                },
            )?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::Invalid {
                message: format!("Failed to build Splitwise HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ExpenseSink for SplitwiseClient {
    /// Create an expense and return the id of the first created record.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Transport`] for network failures,
    /// [`SinkError::Status`] for non-success responses (auth and validation
    /// failures included), [`SinkError::Decode`] for unreadable bodies, and
    /// [`SinkError::EmptyResponse`] when the API accepts the request but
    /// reports no created expenses. No retries.
    #[instrument(skip(self, expense), fields(cost = %expense.cost))]
    async fn create_expense(&self, expense: &CreateExpense) -> Result<ExpenseId, SinkError> {
        let url = format!("{}/create_expense", self.base_url);
        debug!(url = %url, "Creating expense on Splitwise");

        let response = self
            .http
            .post(&url)
            .json(expense)
            .send()
            .await
            .map_err(|e| SinkError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SinkError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: CreateExpenseResponse =
            response.json().await.map_err(|e| SinkError::Decode {
                message: e.to_string(),
            })?;

        body.expenses
            .into_iter()
            .next()
            .map(|created| ExpenseId::new(created.id))
            .ok_or(SinkError::EmptyResponse)
    }
}

#[cfg(test)]
#[path = "splitwise_client_tests.rs"]
mod tests;
