// Query lexer.
//
// Splits query text into words, single punctuation characters, quoted
// literals and logical separators. Quoted content is never split; memchr is
// used to jump between quote characters inside a literal.

use std::ops::Range;

use memchr::memchr;

use crate::token::{Span, Token, TokenKind, is_punct, is_quote, is_space, separator_for};

/// Lexer over query text, yielding tokens lazily.
///
/// A run of whitespace outside quotes becomes one [`TokenKind::Separator`]
/// emitted just before the next significant token; trailing whitespace
/// produces nothing. The separator is `"\n"` when the run held a line break
/// and `" "` otherwise.
///
/// A quote character preceded by a backslash never opens or closes a
/// literal, even when that backslash is itself escaped: `'C:\\'` does not
/// close, and the literal runs on to the next unescaped quote or to the end
/// of input.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The source text.
    src: &'a str,
    /// Current byte offset into src.
    pos: usize,
    /// Start of the whitespace run waiting to be emitted as a separator.
    pending_sep: Option<usize>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given query text.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            src: source,
            pos: 0,
            pending_sep: None,
        }
    }

    /// Tokenize the entire input into a Vec of tokens.
    #[must_use]
    pub fn tokenize(source: &str) -> Vec<Token<'_>> {
        Lexer::new(source).collect()
    }

    /// Produce the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        let span = self.next_span()?;
        Some(match span.kind {
            TokenKind::Separator => separator_for(&self.src[span.range]),
            kind => Token::new(kind, &self.src[span.range]),
        })
    }

    pub(crate) fn next_span(&mut self) -> Option<Span> {
        let bytes = self.src.as_bytes();
        let mut start: Option<usize> = None;
        let mut quote: Option<u8> = None;

        while self.pos < bytes.len() {
            if let Some(q) = quote {
                // Inside a literal only the matching, unescaped quote matters.
                let Some(offset) = memchr(q, &bytes[self.pos..]) else {
                    self.pos = bytes.len();
                    break;
                };
                let at = self.pos + offset;
                self.pos = at + 1;
                if bytes[at - 1] != b'\\' {
                    return Some(self.span(TokenKind::Quoted, start, at + 1));
                }
                continue;
            }

            let ch = bytes[self.pos];
            if is_space(ch) {
                self.pending_sep.get_or_insert(self.pos);
                self.pos += 1;
                if let Some(s) = start {
                    return Some(self.span(TokenKind::Word, Some(s), self.pos - 1));
                }
                continue;
            }

            if start.is_none() {
                if let Some(sep) = self.pending_sep.take() {
                    return Some(Span {
                        kind: TokenKind::Separator,
                        range: sep..self.pos,
                    });
                }
            }

            if is_punct(ch) {
                if let Some(s) = start {
                    return Some(self.span(TokenKind::Word, Some(s), self.pos));
                }
                self.pos += 1;
                return Some(self.span(TokenKind::Punct, Some(self.pos - 1), self.pos));
            }

            start.get_or_insert(self.pos);
            self.pos += 1;
            if is_quote(ch) {
                if self.pos >= 2 && bytes[self.pos - 2] == b'\\' {
                    // An escaped quote outside a literal ends the token.
                    return Some(self.span(TokenKind::Quoted, start, self.pos));
                }
                quote = Some(ch);
            }
        }

        let s = start?;
        let kind = if quote.is_some() {
            TokenKind::Quoted
        } else {
            TokenKind::Word
        };
        Some(self.span(kind, Some(s), self.pos))
    }

    fn span(&self, kind: TokenKind, start: Option<usize>, end: usize) -> Span {
        let range: Range<usize> = start.unwrap_or(end)..end;
        debug_assert!(self.src.is_char_boundary(range.start));
        debug_assert!(self.src.is_char_boundary(range.end));
        Span { kind, range }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<&str> {
        Lexer::tokenize(src).iter().map(Token::text).collect()
    }

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::tokenize(src).iter().map(|t| t.kind).collect()
    }

    fn significant(src: &str) -> Vec<&str> {
        Lexer::tokenize(src)
            .iter()
            .filter(|t| !t.is_separator())
            .map(Token::text)
            .collect()
    }

    #[test]
    fn test_lex_empty() {
        assert!(lex("").is_empty());
        assert!(lex(" \t\r\n").is_empty());
    }

    #[test]
    fn test_lex_words_and_separators() {
        assert_eq!(lex("select id"), vec!["select", " ", "id"]);
        assert_eq!(lex("a \t b"), vec!["a", " ", "b"]);
    }

    #[test]
    fn test_lex_line_break_separator() {
        assert_eq!(lex("a \t\n b"), vec!["a", "\n", "b"]);
        assert_eq!(lex("-- c\r\nselect"), vec!["-", "-", " ", "c", "\n", "select"]);
        assert_eq!(kinds("a\nb")[1], TokenKind::Separator);
    }

    #[test]
    fn test_lex_escaped_backslash_does_not_close() {
        assert_eq!(lex(r"'C:\\' and x"), vec![r"'C:\\' and x"]);
        assert_eq!(kinds(r"'C:\\' and x"), vec![TokenKind::Quoted]);
    }

    #[test]
    fn test_lex_leading_whitespace_trailing_dropped() {
        assert_eq!(lex("  a  "), vec![" ", "a"]);
    }

    #[test]
    fn test_lex_separator_before_punct() {
        assert_eq!(lex("a = ?"), vec!["a", " ", "=", " ", "?"]);
        assert_eq!(
            kinds("a = ?"),
            vec![
                TokenKind::Word,
                TokenKind::Separator,
                TokenKind::Punct,
                TokenKind::Separator,
                TokenKind::Punct,
            ]
        );
    }

    #[test]
    fn test_lex_punct_is_single_char() {
        assert_eq!(lex("in(?,?);"), vec!["in", "(", "?", ",", "?", ")", ";"]);
        assert_eq!(lex("a<=b"), vec!["a", "<", "=", "b"]);
    }

    #[test]
    fn test_lex_comment_markers_split() {
        assert_eq!(
            significant("# // -- /* */"),
            vec!["#", "/", "/", "-", "-", "/", "*", "*", "/"]
        );
    }

    #[test]
    fn test_lex_named_parameters() {
        assert_eq!(significant(":id, :name"), vec![":", "id", ",", ":", "name"]);
        assert_eq!(significant("@p1"), vec!["@", "p1"]);
        assert_eq!(significant("$1"), vec!["$1"]);
    }

    #[test]
    fn test_lex_quoted_literal_is_one_token() {
        assert_eq!(lex("'a b;c'"), vec!["'a b;c'"]);
        assert_eq!(lex("x = \"?\""), vec!["x", " ", "=", " ", "\"?\""]);
        assert_eq!(kinds("`t`"), vec![TokenKind::Quoted]);
    }

    #[test]
    fn test_lex_separator_before_opening_quote() {
        assert_eq!(lex("a 'b'"), vec!["a", " ", "'b'"]);
    }

    #[test]
    fn test_lex_prefixed_literal() {
        assert_eq!(lex("N'x' y"), vec!["N'x'", " ", "y"]);
    }

    #[test]
    fn test_lex_other_quote_inside_literal() {
        assert_eq!(lex("'it\"s' x"), vec!["'it\"s'", " ", "x"]);
        assert_eq!(lex("\"a'b`c\""), vec!["\"a'b`c\""]);
    }

    #[test]
    fn test_lex_escaped_quote_inside_literal() {
        assert_eq!(lex(r"'it\'s' x"), vec![r"'it\'s'", " ", "x"]);
    }

    #[test]
    fn test_lex_escaped_quote_outside_literal() {
        assert_eq!(lex(r"\'part2"), vec![r"\'", "part2"]);
        assert_eq!(kinds(r"\'"), vec![TokenKind::Quoted]);
    }

    #[test]
    fn test_lex_unterminated_literal_runs_to_end() {
        assert_eq!(lex("a 'b c"), vec!["a", " ", "'b c"]);
        assert_eq!(kinds("'b c"), vec![TokenKind::Quoted]);
    }

    #[test]
    fn test_lex_whitespace_inside_quotes_kept() {
        assert_eq!(lex("'\t?' \"\n?\""), vec!["'\t?'", " ", "\"\n?\""]);
    }

    #[test]
    fn test_lex_adjacent_literals() {
        assert_eq!(lex("'a''b'"), vec!["'a'", "'b'"]);
    }

    #[test]
    fn test_lex_non_ascii() {
        assert_eq!(lex("név = 'árvíztűrő'"), vec!["név", " ", "=", " ", "'árvíztűrő'"]);
    }

    #[test]
    fn test_lex_tokens_borrow_source() {
        let src = String::from("select x");
        let toks = Lexer::tokenize(&src);
        let base = src.as_ptr() as usize;
        let word = toks[2].text().as_ptr() as usize;
        assert_eq!(word - base, 7);
    }

    #[test]
    fn test_lex_fused() {
        let mut lexer = Lexer::new("a");
        assert!(lexer.next().is_some());
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }
}
