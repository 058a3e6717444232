//! Service configuration.
//!
//! Layered loading through the `config` crate. Sources, later overriding
//! earlier:
//!
//!  1. `config/service.yaml`                       - deployment-local file
//!  2. Path given by `EXPENSE_BRIDGE_CONFIG_FILE`  - operator-specified file
//!  3. Environment variables prefixed `EB` with a double-underscore
//!     separator, e.g. `EB__SPLITWISE__GROUP_ID=12345678`.
//!
//! Every field carries a serde default, so an absent file still produces a
//! valid structure; [`ServiceConfig::validate`] then decides whether the
//! result can actually run.

use expense_bridge_core::{CategoryMap, CategoryMapError, SecretString};
use serde::Deserialize;
use std::collections::HashMap;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_FILE_ENV: &str = "EXPENSE_BRIDGE_CONFIG_FILE";

// ============================================================================
// Error Type
// ============================================================================

/// Failure loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("Failed to load configuration: {message}")]
    Load { message: String },

    /// The loaded configuration cannot run.
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    /// The category mapping table is unusable.
    #[error("Invalid category mapping: {0}")]
    Categories(#[from] CategoryMapError),
}

// ============================================================================
// Configuration Types
// ============================================================================

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Up API settings.
    pub up: UpConfig,

    /// Splitwise API settings.
    pub splitwise: SplitwiseConfig,

    /// Webhook verification settings.
    pub webhook: WebhookConfig,

    /// Relevance filter settings.
    pub filter: FilterConfig,

    /// Category mapping override; the built-in table applies when absent.
    pub categories: Option<HashMap<String, i64>>,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Graceful shutdown timeout in seconds.
    pub shutdown_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout_seconds: 30,
        }
    }
}

/// Up API client configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpConfig {
    /// Personal access token, sent as a bearer token.
    pub api_token: SecretString,

    /// API base URL; overridden in tests to point at a mock server.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for UpConfig {
    fn default() -> Self {
        Self {
            api_token: SecretString::default(),
            base_url: "https://api.up.com.au/api/v1".to_string(),
            timeout_seconds: 10,
        }
    }
}

/// Splitwise API client configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SplitwiseConfig {
    /// API key, sent as a bearer token.
    pub api_key: SecretString,

    /// API base URL; overridden in tests to point at a mock server.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_seconds: u64,

    /// Group id every expense is added to. Must be configured; there is no
    /// sensible default group.
    pub group_id: i64,
}

impl Default for SplitwiseConfig {
    fn default() -> Self {
        Self {
            api_key: SecretString::default(),
            base_url: "https://secure.splitwise.com/api/v3.0".to_string(),
            timeout_seconds: 10,
            group_id: 0,
        }
    }
}

/// Webhook verification configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Shared secret Up signs deliveries with. An empty secret makes the
    /// service reject every delivery as not authentic.
    pub secret: SecretString,
}

/// Relevance filter configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Transaction descriptions that never become expenses, matched
    /// case-insensitively.
    pub ignored_descriptions: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            ignored_descriptions: vec!["description 1".to_string(), "description 2".to_string()],
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,

    /// Emit JSON structured logs instead of the human-readable format.
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "expense_bridge_service=info,expense_bridge_core=info,tower_http=info"
                .to_string(),
            json_format: false,
        }
    }
}

// ============================================================================
// Loading and Validation
// ============================================================================

impl ServiceConfig {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a present source is malformed or
    /// an environment variable cannot be coerced to the field type. Absent
    /// files are not errors.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder().add_source(
            config::File::with_name("config/service")
                .required(false)
                .format(config::FileFormat::Yaml),
        );

        if let Ok(explicit_path) = std::env::var(CONFIG_FILE_ENV) {
            if !explicit_path.is_empty() {
                builder = builder.add_source(
                    config::File::with_name(&explicit_path)
                        .required(true)
                        .format(config::FileFormat::Yaml),
                );
            }
        }

        let loaded = builder
            .add_source(config::Environment::with_prefix("EB").separator("__"))
            .build()
            .map_err(|e| ConfigError::Load {
                message: e.to_string(),
            })?;

        loaded.try_deserialize().map_err(|e| ConfigError::Load {
            message: e.to_string(),
        })
    }

    /// Check that the configuration can run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an unusable server section or an
    /// unconfigured Splitwise group, and [`ConfigError::Categories`] when a
    /// category override lacks the mandatory fallback entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::Invalid {
                message: "server.host must not be empty".to_string(),
            });
        }

        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                message: "server.port must not be 0".to_string(),
            });
        }

        if self.splitwise.group_id <= 0 {
            return Err(ConfigError::Invalid {
                message: "splitwise.group_id must be configured".to_string(),
            });
        }

        // Surfaces a bad override at startup instead of at first webhook.
        self.category_map()?;

        Ok(())
    }

    /// Build the category map: the configured override, or the built-in
    /// table when no override is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Categories`] when the override lacks the
    /// `uncategorized` fallback entry.
    pub fn category_map(&self) -> Result<CategoryMap, ConfigError> {
        match &self.categories {
            Some(entries) => Ok(CategoryMap::new(entries.clone())?),
            None => Ok(CategoryMap::default_mapping()),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
