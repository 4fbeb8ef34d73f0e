//! Binder configuration.

use std::num::NonZeroUsize;

use qbind_error::{BindError, Result};
use qbind_lexer::DEFAULT_CAPACITY;
use qbind_types::BindDialect;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Token cache sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenCacheConfig {
    /// Maximum number of cached query texts. `None` disables eviction.
    #[serde(deserialize_with = "capacity_or_unbounded")]
    pub capacity: Option<NonZeroUsize>,
}

/// Reads a capacity the way [`TokenCacheConfig::with_capacity`] takes one.
fn capacity_or_unbounded<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<NonZeroUsize>, D::Error>
where
    D: Deserializer<'de>,
{
    let capacity = Option::<usize>::deserialize(deserializer)?;
    Ok(capacity.and_then(|n| TokenCacheConfig::with_capacity(n).capacity))
}

impl TokenCacheConfig {
    /// Bounded to `capacity` entries.
    ///
    /// A capacity of zero cannot hold anything, so it is treated as
    /// unbounded and a warning is logged.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity);
        if capacity.is_none() {
            warn!("token cache capacity 0 requested, using an unbounded cache");
        }
        Self { capacity }
    }

    /// No eviction.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { capacity: None }
    }
}

impl Default for TokenCacheConfig {
    fn default() -> Self {
        Self {
            capacity: NonZeroUsize::new(DEFAULT_CAPACITY),
        }
    }
}

/// Configuration of a [`Binder`](crate::Binder).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinderConfig {
    /// Placeholder style produced by rebinding.
    pub dialect: BindDialect,
    pub token_cache: TokenCacheConfig,
}

impl BinderConfig {
    /// Default configuration for the given dialect.
    #[must_use]
    pub fn new(dialect: BindDialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Default configuration for a driver, see [`BindDialect::for_driver`].
    #[must_use]
    pub fn for_driver(driver: &str) -> Self {
        Self::new(BindDialect::for_driver(driver))
    }

    #[must_use]
    pub const fn with_token_cache(mut self, token_cache: TokenCacheConfig) -> Self {
        self.token_cache = token_cache;
        self
    }

    /// Parse a JSON document. Missing fields take their defaults, and a cache
    /// capacity of zero means unbounded as in
    /// [`TokenCacheConfig::with_capacity`].
    ///
    /// # Errors
    ///
    /// [`BindError::InvalidConfig`] when the document is malformed or names an
    /// unknown dialect.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BindError::invalid_config(e.to_string()))
    }

    /// Serialize to a JSON document.
    ///
    /// # Errors
    ///
    /// [`BindError::InvalidConfig`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| BindError::invalid_config(e.to_string()))
    }
}
