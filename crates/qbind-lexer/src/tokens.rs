//! Owned token sequences.

use std::fmt;

use crate::lexer::Lexer;
use crate::token::{Span, Token, TokenKind, separator_for};

/// The tokens of one query text, owning that text.
///
/// Stored behind an `Arc` in the token cache and shared read-only between
/// callers.
#[derive(Clone, PartialEq, Eq)]
pub struct Tokens {
    source: Box<str>,
    spans: Vec<Span>,
}

impl Tokens {
    /// Tokenize `source` without going through a cache.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut lexer = Lexer::new(source);
        let spans = std::iter::from_fn(|| lexer.next_span()).collect();
        Self {
            source: source.into(),
            spans,
        }
    }

    /// The text these tokens were produced from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Token<'_>> {
        self.spans.get(index).map(|span| self.token(span))
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            tokens: self,
            inner: self.spans.iter(),
        }
    }

    /// Tokens other than separators.
    pub fn significant(&self) -> impl Iterator<Item = Token<'_>> + '_ {
        self.iter().filter(|t| !t.is_separator())
    }

    fn token(&self, span: &Span) -> Token<'_> {
        match span.kind {
            TokenKind::Separator => separator_for(&self.source[span.range.clone()]),
            kind => Token::new(kind, &self.source[span.range.clone()]),
        }
    }
}

impl fmt::Debug for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|t| t.text())).finish()
    }
}

/// Iterator over [`Tokens`].
#[derive(Clone)]
pub struct Iter<'a> {
    tokens: &'a Tokens,
    inner: std::slice::Iter<'a, Span>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|span| self.tokens.token(span))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|span| self.tokens.token(span))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Tokens {
    type Item = Token<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_matches_borrowed() {
        let src = "select * from t where id in (?) and name = 'a b'";
        let owned = Tokens::new(src);
        let borrowed = Lexer::tokenize(src);
        assert_eq!(owned.len(), borrowed.len());
        assert!(owned.iter().eq(borrowed.into_iter()));
        assert_eq!(owned.source(), src);
    }

    #[test]
    fn significant_skips_separators() {
        let toks = Tokens::new(" a = b");
        let sig: Vec<_> = toks.significant().map(|t| t.text()).collect();
        assert_eq!(sig, vec!["a", "=", "b"]);
        assert_eq!(toks.get(0), Some(Token::SEPARATOR));
        assert_eq!(toks.get(9), None);
    }

    #[test]
    fn owned_separator_keeps_line_break() {
        let toks = Tokens::new("a\n  b c");
        let texts: Vec<_> = toks.iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["a", "\n", "b", " ", "c"]);
    }

    #[test]
    fn debug_lists_texts() {
        assert_eq!(format!("{:?}", Tokens::new("a(b)")), r#"["a", "(", "b", ")"]"#);
    }
}
