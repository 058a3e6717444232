//! HTTP server and webhook handler.
//!
//! Thin plumbing around the core pipeline: one webhook endpoint and a
//! health check. Response status codes follow the bridge's contract with
//! the webhook sender: every expected outcome (not authentic, ping,
//! non-creation event, ignorable transaction, success) answers 200 so Up
//! never retries or alerts on deliberate no-ops; only unexpected failures
//! answer 500.

use crate::config::ServerConfig;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use expense_bridge_core::signature::SIGNATURE_HEADER;
use expense_bridge_core::{PipelineOutcome, WebhookPipeline};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The webhook processing pipeline.
    pub pipeline: Arc<WebhookPipeline>,
}

// ============================================================================
// Error Type
// ============================================================================

/// Failure starting or running the HTTP server.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The listen address could not be bound.
    #[error("Failed to bind {address}: {message}")]
    BindFailed { address: String, message: String },

    /// The server terminated with an error.
    #[error("Server failed: {message}")]
    ServerFailed { message: String },
}

// ============================================================================
// Response Types
// ============================================================================

/// Message response for every non-creating outcome and for failures.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Success response carrying the created expense id.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// ============================================================================
// Router
// ============================================================================

/// Create the HTTP router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(handle_webhook))
        .route("/health", get(handle_health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// Handle one webhook delivery from Up.
///
/// The body is taken as raw bytes so signature verification runs over the
/// payload exactly as received; parsing happens inside the pipeline only
/// after verification.
#[instrument(skip(state, headers, body))]
async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    info!(body_len = body.len(), "Received webhook request");

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    match state.pipeline.process(&body, signature).await {
        Ok(outcome) => outcome_response(outcome),
        Err(e) => {
            error!(error = %e, "Webhook processing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse {
                    message: "An error occurred".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Map a pipeline outcome to its HTTP response. All outcomes are 200.
fn outcome_response(outcome: PipelineOutcome) -> Response {
    let message = match outcome {
        PipelineOutcome::Created(id) => {
            return Json(CreatedResponse { id: id.to_string() }).into_response();
        }
        PipelineOutcome::NotAuthentic => "Request is not from Up",
        PipelineOutcome::NoBody => "No body received in request",
        PipelineOutcome::Pinged => "Successfully Pinged Webhook",
        PipelineOutcome::NotCreation => "Not a new transaction",
        PipelineOutcome::Ignored => "Ignorable Transaction",
    };

    Json(MessageResponse {
        message: message.to_string(),
    })
    .into_response()
}

/// Basic health check endpoint.
async fn handle_health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Server
// ============================================================================

/// Start the HTTP server and run until a shutdown signal arrives.
///
/// # Errors
///
/// Returns [`ServiceError::BindFailed`] when the listen address is taken or
/// unavailable, and [`ServiceError::ServerFailed`] when the server loop
/// terminates abnormally.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), ServiceError> {
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e: std::net::AddrParseError| ServiceError::BindFailed {
            address: format!("{}:{}", config.host, config.port),
            message: e.to_string(),
        })?;

    let listener =
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServiceError::BindFailed {
                address: addr.to_string(),
                message: e.to_string(),
            })?;

    info!("Starting HTTP server on {}", addr);

    let shutdown_timeout = std::time::Duration::from_secs(config.shutdown_timeout_seconds);

    let shutdown_signal = async move {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C signal handler");
        };

        #[cfg(unix)]
        let terminate = async {
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM signal handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!(
                    "Received SIGINT (Ctrl+C), initiating graceful shutdown with {}s timeout",
                    shutdown_timeout.as_secs()
                );
            },
            _ = terminate => {
                info!(
                    "Received SIGTERM, initiating graceful shutdown with {}s timeout",
                    shutdown_timeout.as_secs()
                );
            },
        }
    };

    // In-flight requests are allowed to finish; new connections are refused
    // as soon as the signal arrives.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| ServiceError::ServerFailed {
            message: e.to_string(),
        })?;

    info!("HTTP server shutdown complete");
    Ok(())
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
