// Query tokens.
//
// A token is a view into the scanned text; its kind is implied by content
// and recorded once by the lexer so callers never re-classify.

use std::fmt;
use std::ops::Range;

use memchr::memchr2;

/// Token category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Unquoted run of non-punctuation, non-whitespace characters.
    Word,
    /// A single punctuation character, see [`is_punct`].
    Punct,
    /// A token ended by a quote character: a complete quoted literal
    /// (optionally prefixed, as in `N'x'`), an unterminated literal, or a
    /// word ending in an escaped quote.
    Quoted,
    /// One logical separator standing for a run of whitespace. Renders as
    /// `"\n"` when the run contained a line break, `" "` otherwise.
    Separator,
}

/// A single token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    /// The token discriminant.
    pub kind: TokenKind,
    text: &'a str,
}

impl<'a> Token<'a> {
    /// Separator for a whitespace run on one line.
    pub const SEPARATOR: Token<'static> = Token {
        kind: TokenKind::Separator,
        text: " ",
    };

    /// Separator for a whitespace run containing `\n` or `\r`. Keeps a `--`
    /// line comment from running into the tokens after it.
    pub const NEWLINE: Token<'static> = Token {
        kind: TokenKind::Separator,
        text: "\n",
    };

    pub(crate) const fn new(kind: TokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }

    /// Token text. For a separator this is `" "` or `"\n"`.
    pub const fn text(&self) -> &'a str {
        self.text
    }

    pub const fn is_separator(&self) -> bool {
        matches!(self.kind, TokenKind::Separator)
    }

    /// Whether this is the anonymous `?` placeholder.
    pub fn is_question(&self) -> bool {
        self.kind == TokenKind::Punct && self.text == "?"
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

impl PartialEq<str> for Token<'_> {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Token<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

/// Characters that always form a token of their own outside quotes.
#[inline]
pub const fn is_punct(b: u8) -> bool {
    matches!(
        b,
        b':' | b';'
            | b','
            | b'('
            | b')'
            | b'['
            | b']'
            | b'{'
            | b'}'
            | b'.'
            | b'='
            | b'?'
            | b'+'
            | b'-'
            | b'*'
            | b'/'
            | b'>'
            | b'<'
            | b'!'
            | b'~'
            | b'%'
            | b'@'
            | b'&'
            | b'|'
    )
}

/// The separator standing for the whitespace `run`.
pub(crate) fn separator_for(run: &str) -> Token<'static> {
    if memchr2(b'\n', b'\r', run.as_bytes()).is_some() {
        Token::NEWLINE
    } else {
        Token::SEPARATOR
    }
}

#[inline]
pub(crate) const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[inline]
pub(crate) const fn is_quote(b: u8) -> bool {
    matches!(b, b'"' | b'\'' | b'`')
}

/// Byte range of a token in its source text. Separators carry the range of
/// the whitespace run they replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Span {
    pub kind: TokenKind,
    pub range: Range<usize>,
}
