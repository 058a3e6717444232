//! HTTP client for the Up banking API.
//!
//! Implements the [`TransactionSource`] seam of the pipeline with a
//! `reqwest` client: one authenticated read,
//! `GET {base_url}/transactions/{id}`.

use crate::config::{ConfigError, UpConfig};
use async_trait::async_trait;
use expense_bridge_core::transaction::TransactionEnvelope;
use expense_bridge_core::{SourceError, Transaction, TransactionSource};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::time::Duration;
use tracing::{debug, instrument};

/// Authenticated client for the Up API.
#[derive(Debug, Clone)]
pub struct UpClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpClient {
    /// Build a client from configuration.
    ///
    /// The bearer token is installed as a default header and marked
    /// sensitive so it never shows up in logged requests.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the token cannot be used as a
    /// header value or the underlying HTTP client cannot be constructed.
    pub fn new(config: &UpConfig) -> Result<Self, ConfigError> {
        let mut auth_value =
            HeaderValue::from_str(&format!("Bearer {}", config.api_token.expose_secret()))
                .map_err(|_| ConfigError::Invalid {
                    message: "up.api_token contains characters not valid in a header".to_string(),
                })?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::Invalid {
                message: format!("Failed to build Up HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TransactionSource for UpClient {
    /// Fetch a transaction by id.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Transport`] for network failures,
    /// [`SourceError::Status`] for non-success responses (including
    /// not-found), and [`SourceError::Decode`] when the body is not a
    /// transaction resource. No retries.
    #[instrument(skip(self))]
    async fn fetch_transaction(&self, id: &str) -> Result<Transaction, SourceError> {
        let url = format!("{}/transactions/{}", self.base_url, id);
        debug!(url = %url, "Fetching transaction from Up");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: TransactionEnvelope =
            response.json().await.map_err(|e| SourceError::Decode {
                message: e.to_string(),
            })?;

        Ok(envelope.data)
    }
}

#[cfg(test)]
#[path = "up_client_tests.rs"]
mod tests;
