// Token reassembly.
//
// `concat` reproduces the token texts exactly. Separators already stand
// where the input had whitespace, so rewriting keeps the caller's layout.
// `merge` rebuilds a normalized query from significant tokens only.

use crate::token::Token;

/// Join token texts with nothing in between.
pub fn concat<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = Token<'a>>,
{
    let mut out = String::new();
    for tok in tokens {
        out.push_str(tok.text());
    }
    out
}

/// Join significant tokens with single spaces, keeping comment markers,
/// named parameters and `::` casts glued.
pub fn merge<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = Token<'a>>,
{
    let mut out = String::new();
    let mut prev: Option<&str> = None;
    for tok in tokens {
        if tok.is_separator() {
            continue;
        }
        let text = tok.text();
        if let Some(p) = prev {
            if !glued(p, text) {
                out.push(' ');
            }
        }
        out.push_str(text);
        prev = Some(text);
    }
    out
}

/// Whether `next` attaches to `prev` without a space.
fn glued(prev: &str, next: &str) -> bool {
    match prev {
        ":" => next == ":" || starts_ident(next),
        "@" | "$" => starts_ident(next),
        "-" => next == "-",
        "/" => next == "*" || next == "/",
        "*" => next == "/",
        _ => false,
    }
}

fn starts_ident(text: &str) -> bool {
    text.as_bytes()
        .first()
        .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_')
}
