//! Token-aware counting and statement splitting.

use crate::cache::TokenCache;
use crate::merge::merge;
use crate::token::Token;

/// Number of significant tokens of `text` equal to `needle`.
///
/// Occurrences inside quoted literals are never counted, since a literal is
/// always a single token.
pub fn count(cache: &TokenCache, text: &str, needle: &str) -> usize {
    cache
        .tokenize(text)
        .significant()
        .filter(|t| t.text() == needle)
        .count()
}

/// Split `text` after every significant token equal to `sep`.
///
/// Each part is reassembled with [`merge`] and keeps its trailing
/// separator. Parts made only of `sep` characters are dropped.
pub fn split(cache: &TokenCache, text: &str, sep: &str) -> Vec<String> {
    let tokens = cache.tokenize(text);
    let significant: Vec<Token<'_>> = tokens.significant().collect();
    let mut parts = Vec::new();
    let mut last = 0;
    for (i, tok) in significant.iter().enumerate() {
        if tok.text() == sep || i + 1 == significant.len() {
            let joint = merge(significant[last..=i].iter().copied());
            if !joint.trim_matches(|c| sep.contains(c)).is_empty() {
                parts.push(joint);
            }
            last = i + 1;
        }
    }
    parts
}
