// Placeholder rebinding.
//
// Rewrites anonymous `?` placeholders into a driver's numbered style. The
// counter is local to each call.

use std::fmt::Write as _;

use qbind_lexer::TokenCache;
use qbind_types::BindDialect;
use tracing::debug;

/// Rebind `query` for `dialect` using the process-wide token cache.
pub fn rebind(dialect: BindDialect, query: &str) -> String {
    rebind_with(TokenCache::global(), dialect, query)
}

/// Rebind `query` for `dialect`.
///
/// Question-mark and unknown dialects return the query unchanged. Numbered
/// dialects rewrite through the lexer, so each whitespace run outside quotes
/// comes back as one space, or one newline when the run held a line break.
/// Placeholders inside quoted literals are never touched.
pub fn rebind_with(cache: &TokenCache, dialect: BindDialect, query: &str) -> String {
    let Some(prefix) = dialect.numbered_prefix() else {
        return query.to_owned();
    };
    let tokens = cache.tokenize(query);
    let mut out = String::with_capacity(query.len() + 8);
    let mut n = 0_usize;
    for tok in tokens.iter() {
        if tok.is_question() {
            n += 1;
            // Writing to a String cannot fail.
            let _ = write!(out, "{prefix}{n}");
        } else {
            out.push_str(tok.text());
        }
    }
    debug!(%dialect, placeholders = n, "rebound placeholders");
    out
}
