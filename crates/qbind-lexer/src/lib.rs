//! Quote-aware tokenizer for SQL query text.
//!
//! The lexer does not parse SQL. It only needs to know where quoted
//! literals start and end, which characters stand alone as punctuation, and
//! where whitespace separates words. That is enough to find `?`
//! placeholders and statement separators without matching them inside
//! literals.

pub mod cache;
pub mod lexer;
pub mod merge;
pub mod split;
pub mod token;
pub mod tokens;

use std::sync::Arc;

pub use cache::{CacheStats, DEFAULT_CAPACITY, TokenCache};
pub use lexer::Lexer;
pub use merge::{concat, merge};
pub use split::{count, split};
pub use token::{Token, TokenKind, is_punct};
pub use tokens::Tokens;

/// Tokenize `text` through the process-wide [`TokenCache`].
pub fn tokenize(text: &str) -> Arc<Tokens> {
    TokenCache::global().tokenize(text)
}
