//! Runtime query binding.
//!
//! Support routines for generated and hand-written database access code:
//!
//! - expanding `IN (?)` placeholders to match variable-length collections
//!   ([`rewrite_in`]),
//! - flattening call-site arguments into positional or named lists
//!   ([`merge_args`], [`merge_named_args`]),
//! - converting `?` placeholders to a driver's dialect ([`rebind`]),
//! - token-aware counting and statement splitting ([`count`], [`split`]).
//!
//! Free functions share a process-wide token cache. A [`Binder`] carries its
//! own cache and dialect.
//!
//! ```
//! use qbind::{BindDialect, Binder, BinderConfig, args};
//!
//! let binder = Binder::new(BinderConfig::new(BindDialect::Dollar));
//! let (query, flat) = binder
//!     .prepare("select * from users where id in (?) and active = ?", args![[1, 2], true])
//!     .unwrap();
//! assert_eq!(query, "select * from users where id in ($1,$2) and active = $3");
//! assert_eq!(flat.len(), 3);
//! ```

pub mod binder;
pub mod config;

pub use binder::Binder;
pub use config::{BinderConfig, TokenCacheConfig};
pub use qbind_args::{
    Arguments, MAX_BIND_VARS, bind_vars, flatten, merge_args, merge_named_args, placeholder_count,
    placeholders, rebind, rebind_with, rewrite_in, rewrite_in_with,
};
pub use qbind_error::{BindError, ErrorKind, Result};
pub use qbind_lexer::{
    CacheStats, Lexer, Token, TokenCache, TokenKind, Tokens, concat, merge, tokenize,
};
pub use qbind_types::{
    Arg, Argument, BindDialect, Field, NamedArgs, Record, Valuer, args, leading_ident,
};

/// Occurrences of `token` in `query` outside quoted literals, using the
/// process-wide token cache.
pub fn count(query: &str, token: &str) -> usize {
    qbind_lexer::count(TokenCache::global(), query, token)
}

/// Split `query` into statements on `sep`, using the process-wide token
/// cache.
pub fn split(query: &str, sep: &str) -> Vec<String> {
    qbind_lexer::split(TokenCache::global(), query, sep)
}
