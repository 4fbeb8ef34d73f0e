//! Configured entry point.
//!
//! A [`Binder`] owns (or shares) a token cache and knows the target
//! dialect, so tests and multi-tenant callers can avoid the process-wide
//! cache entirely.

use std::sync::Arc;

use qbind_args::{rebind_with, rewrite_in_with};
use qbind_error::Result;
use qbind_lexer::{TokenCache, Tokens, count, split};
use qbind_types::{Arg, BindDialect};

use crate::config::{BinderConfig, TokenCacheConfig};

/// Query binder bound to one dialect and one token cache.
#[derive(Debug, Clone)]
pub struct Binder {
    config: BinderConfig,
    cache: Arc<TokenCache>,
}

impl Binder {
    /// Binder with its own cache, sized from `config`.
    #[must_use]
    pub fn new(config: BinderConfig) -> Self {
        let cache = Arc::new(TokenCache::with_capacity(config.token_cache.capacity));
        Self { config, cache }
    }

    /// Binder sharing an existing cache. The cache settings in `config` are
    /// replaced by those of `cache`.
    #[must_use]
    pub fn with_cache(mut config: BinderConfig, cache: Arc<TokenCache>) -> Self {
        config.token_cache = TokenCacheConfig {
            capacity: cache.capacity(),
        };
        Self { config, cache }
    }

    /// Binder with its own cache for a driver name.
    #[must_use]
    pub fn for_driver(driver: &str) -> Self {
        Self::new(BinderConfig::for_driver(driver))
    }

    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    pub fn dialect(&self) -> BindDialect {
        self.config.dialect
    }

    pub fn cache(&self) -> &Arc<TokenCache> {
        &self.cache
    }

    pub fn tokenize(&self, query: &str) -> Arc<Tokens> {
        self.cache.tokenize(query)
    }

    /// Expand `IN (?)` placeholders, see [`qbind_args::rewrite_in_with`].
    ///
    /// # Errors
    ///
    /// Count mismatches and empty expansions.
    pub fn rewrite_in<I>(&self, query: &str, args: I) -> Result<(String, Vec<Arg>)>
    where
        I: IntoIterator<Item = Arg>,
    {
        rewrite_in_with(&self.cache, query, args)
    }

    /// Convert `?` placeholders to this binder's dialect.
    pub fn rebind(&self, query: &str) -> String {
        rebind_with(&self.cache, self.config.dialect, query)
    }

    /// Expand `IN (?)` placeholders, then rebind the result.
    ///
    /// # Errors
    ///
    /// As [`rewrite_in`](Self::rewrite_in).
    pub fn prepare<I>(&self, query: &str, args: I) -> Result<(String, Vec<Arg>)>
    where
        I: IntoIterator<Item = Arg>,
    {
        let (query, args) = self.rewrite_in(query, args)?;
        Ok((self.rebind(&query), args))
    }

    /// Occurrences of `token` outside quoted literals.
    pub fn count(&self, query: &str, token: &str) -> usize {
        count(&self.cache, query, token)
    }

    /// Split a script into statements on `sep`.
    pub fn split(&self, query: &str, sep: &str) -> Vec<String> {
        split(&self.cache, query, sep)
    }
}

impl Default for Binder {
    fn default() -> Self {
        Self::new(BinderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use qbind_types::args;

    use super::*;

    #[test]
    fn prepare_expands_then_rebinds() {
        let binder = Binder::for_driver("postgres");
        let (query, flat) = binder
            .prepare("select * from t where id in (?) and x = ?", args![[1, 2, 3], "x"])
            .unwrap();
        assert_eq!(query, "select * from t where id in ($1,$2,$3) and x = $4");
        assert_eq!(flat.len(), 4);
    }

    #[test]
    fn own_cache_is_isolated() {
        let a = Binder::default();
        let b = Binder::default();
        a.tokenize("select 1");
        assert_eq!(a.cache().len(), 1);
        assert!(b.cache().is_empty());
    }

    #[test]
    fn shared_cache() {
        let cache = Arc::new(TokenCache::unbounded());
        let a = Binder::with_cache(BinderConfig::new(BindDialect::At), Arc::clone(&cache));
        let b = Binder::with_cache(BinderConfig::new(BindDialect::Dollar), Arc::clone(&cache));
        assert_eq!(a.rebind("x = ?"), "x = @p1");
        assert_eq!(b.rebind("x = ?"), "x = $1");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().hits(), 1);
    }

    #[test]
    fn shared_cache_settings_reported() {
        let binder = Binder::with_cache(BinderConfig::default(), Arc::new(TokenCache::unbounded()));
        assert_eq!(binder.config().token_cache, TokenCacheConfig::unbounded());
        assert_eq!(binder.config().token_cache.capacity, binder.cache().capacity());
    }

    #[test]
    fn unbounded_from_config() {
        let config = BinderConfig::default().with_token_cache(TokenCacheConfig::unbounded());
        assert_eq!(Binder::new(config).cache().capacity(), None);
    }

    #[test]
    fn count_and_split() {
        let binder = Binder::default();
        assert_eq!(binder.count("a = ? and b = '?'", "?"), 1);
        assert_eq!(
            binder.split("create table t (id int); insert into t values (?)", ";"),
            vec!["create table t ( id int ) ;", "insert into t values ( ? )"]
        );
    }
}
