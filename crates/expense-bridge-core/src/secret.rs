//! Secret material wrapper.
//!
//! Configuration carries three secrets: the webhook shared secret, the Up
//! API token, and the Splitwise API key. All three are held in
//! [`SecretString`] so that debug output never leaks them and the backing
//! memory is zeroized on drop.

use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string secret that is zeroized on drop and redacted in debug output.
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SecretString {
    inner: String,
}

impl SecretString {
    /// Create a secret from its raw string value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Get the secret value for immediate use.
    ///
    /// # Security Warning
    /// The returned string contains the actual secret value. Use immediately
    /// and avoid storing in variables.
    pub fn expose_secret(&self) -> &str {
        &self.inner
    }

    /// Check whether the secret is unconfigured.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for SecretString {
    fn default() -> Self {
        Self::new("")
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretString")
            .field("inner", &"[REDACTED]")
            .finish()
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
#[path = "secret_tests.rs"]
mod tests;
