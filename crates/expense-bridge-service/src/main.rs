//! # Expense Bridge Service
//!
//! Binary entry point for the Up-to-Splitwise expense bridge.
//!
//! This executable:
//! - Loads configuration from file and environment
//! - Initializes logging
//! - Wires the Up and Splitwise clients into the webhook pipeline
//! - Starts the HTTP server

mod config;
mod server;
mod splitwise_client;
mod up_client;

use config::{LoggingConfig, ServiceConfig};
use expense_bridge_core::{PipelineConfig, WebhookPipeline};
use server::{start_server, AppState, ServiceError};
use splitwise_client::SplitwiseClient;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use up_client::UpClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration comes first: the logging format depends on it. Load
    // failures are reported on stderr because no subscriber exists yet.
    let config = match ServiceConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(3);
        }
    };

    init_tracing(&config.logging);

    info!("Starting Expense Bridge service");

    if let Err(e) = config.validate() {
        error!(error = %e, "Service configuration is invalid; aborting");
        std::process::exit(3);
    }

    if config.webhook.secret.is_empty() {
        warn!(
            "webhook.secret is not configured; every delivery will be \
             rejected as not authentic until a secret is supplied"
        );
    }

    // The category map was validated above; a failure here is unreachable
    // but still routed to the configuration exit path.
    let categories = match config.category_map() {
        Ok(categories) => categories,
        Err(e) => {
            error!(error = %e, "Category mapping is invalid; aborting");
            std::process::exit(3);
        }
    };

    let up_client = match UpClient::new(&config.up) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to construct Up client; aborting");
            std::process::exit(3);
        }
    };

    let splitwise_client = match SplitwiseClient::new(&config.splitwise) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to construct Splitwise client; aborting");
            std::process::exit(3);
        }
    };

    let pipeline = WebhookPipeline::new(
        PipelineConfig {
            webhook_secret: config.webhook.secret.clone(),
            ignored_descriptions: config.filter.ignored_descriptions.clone(),
            categories,
            group_id: config.splitwise.group_id,
        },
        Arc::new(up_client),
        Arc::new(splitwise_client),
    );

    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    info!(
        host = %config.server.host,
        port = config.server.port,
        group_id = config.splitwise.group_id,
        "Starting HTTP server"
    );

    if let Err(e) = start_server(&config.server, state).await {
        error!("Failed to start server: {}", e);

        let exit_code = match e {
            ServiceError::BindFailed { .. } => 1,
            ServiceError::ServerFailed { .. } => 2,
        };

        std::process::exit(exit_code);
    }

    Ok(())
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured default filter
/// applies. The JSON layer is selected by configuration.
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.json_format {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
