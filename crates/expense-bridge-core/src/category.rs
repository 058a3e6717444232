//! Category mapping from Up category ids to Splitwise category ids.
//!
//! The mapping is a static lookup table constructed once at startup and
//! immutable thereafter. It is data, not code: keeping it an associative
//! structure rather than a match chain lets deployments override it from
//! configuration and test it in isolation.
//!
//! Every map must contain the [`UNCATEGORIZED`] fallback entry. Lookups can
//! then never fail: an uncategorized transaction, or one whose Up category
//! has no mapping, resolves to the fallback.

use std::collections::HashMap;

/// Key of the mandatory fallback entry.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Error constructing a [`CategoryMap`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryMapError {
    /// The mapping table has no `uncategorized` entry to fall back to.
    #[error("Category mapping must contain an '{UNCATEGORIZED}' entry")]
    MissingFallback,
}

/// Immutable mapping from Up category ids to Splitwise category ids.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    entries: HashMap<String, i64>,
}

impl CategoryMap {
    /// Construct a map from a mapping table.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryMapError::MissingFallback`] when the table lacks an
    /// `uncategorized` entry; without it lookups could not be total.
    pub fn new(entries: HashMap<String, i64>) -> Result<Self, CategoryMapError> {
        if !entries.contains_key(UNCATEGORIZED) {
            return Err(CategoryMapError::MissingFallback);
        }
        Ok(Self { entries })
    }

    /// The built-in mapping table.
    pub fn default_mapping() -> Self {
        let entries = [
            (UNCATEGORIZED, 2),
            ("restaurants-and-cafes", 13),
            ("takeaway", 13),
            ("groceries", 12),
            ("booze", 38),
            ("pubs-and-bars", 38),
            ("holidays-and-travel", 47),
            ("public-transport", 32),
            ("taxis-and-share-cars", 36),
            ("clothing-and-accessories", 41),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();

        Self { entries }
    }

    /// Resolve an Up category reference to a Splitwise category id.
    ///
    /// Total function: a `None` reference, or a category with no mapping
    /// entry, resolves to the `uncategorized` fallback.
    pub fn resolve(&self, category: Option<&str>) -> i64 {
        category
            .and_then(|key| self.entries.get(key))
            .copied()
            .unwrap_or_else(|| {
                // Guaranteed present by the construction invariant.
                self.entries[UNCATEGORIZED]
            })
    }
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::default_mapping()
    }
}

#[cfg(test)]
#[path = "category_tests.rs"]
mod tests;
