// Bind-variable generation and IN-clause expansion.

use qbind_error::{BindError, Result};
use qbind_lexer::TokenCache;
use qbind_types::Arg;
use tracing::debug;

use crate::flatten::{flatten, flatten_into};

/// Upper bound on placeholders generated for a single count. Matches the
/// largest parameter index the common wire protocols can address.
pub const MAX_BIND_VARS: usize = 65_535;

/// `n` placeholders joined by commas: `?,?,?`.
///
/// # Panics
///
/// Panics if the `2 * n` byte buffer cannot be allocated. Counts coming
/// through [`placeholder_count`] never exceed [`MAX_BIND_VARS`].
pub fn placeholders(n: usize) -> String {
    let mut out = String::with_capacity(n.saturating_mul(2));
    for i in 0..n {
        if i > 0 {
            out.push(',');
        }
        out.push('?');
    }
    out
}

/// How many placeholders `arg` stands for.
///
/// An integer is a count in its own right (negative counts as zero, larger
/// than [`MAX_BIND_VARS`] counts as that), a sequence counts its elements,
/// and everything else, including a byte sequence, counts as one.
pub fn placeholder_count(arg: &Arg) -> usize {
    match arg {
        Arg::Int(n) => usize::try_from(*n).map_or(0, |n| n.min(MAX_BIND_VARS)),
        Arg::UInt(n) => usize::try_from(*n).map_or(MAX_BIND_VARS, |n| n.min(MAX_BIND_VARS)),
        Arg::Seq(items) => items.len(),
        _ => 1,
    }
}

/// Placeholder list for `arg`, see [`placeholder_count`].
pub fn bind_vars(arg: impl Into<Arg>) -> String {
    placeholders(placeholder_count(&arg.into()))
}

/// Expand every `?` of `query` to as many placeholders as its argument
/// flattens to, using the process-wide token cache.
///
/// # Errors
///
/// See [`rewrite_in_with`].
pub fn rewrite_in<I>(query: &str, args: I) -> Result<(String, Vec<Arg>)>
where
    I: IntoIterator<Item = Arg>,
{
    rewrite_in_with(TokenCache::global(), query, args)
}

/// Expand every `?` of `query` to as many placeholders as its argument
/// flattens to.
///
/// The `i`-th `?` consumes the `i`-th argument. All other tokens are copied
/// unchanged. Returns the rewritten query with the flattened arguments in
/// placeholder order.
///
/// # Errors
///
/// - [`BindError::BindVarsExceedArguments`] when a `?` has no argument left.
/// - [`BindError::EmptyInExpansion`] when an argument flattens to nothing.
/// - [`BindError::BindVarsLessThanArguments`] when arguments remain after the
///   last `?`.
pub fn rewrite_in_with<I>(cache: &TokenCache, query: &str, args: I) -> Result<(String, Vec<Arg>)>
where
    I: IntoIterator<Item = Arg>,
{
    let tokens = cache.tokenize(query);
    let mut args = args.into_iter();
    let mut rewritten = String::with_capacity(query.len());
    let mut flat = Vec::new();
    let mut consumed = 0;

    for tok in tokens.iter() {
        if !tok.is_question() {
            rewritten.push_str(tok.text());
            continue;
        }
        let Some(arg) = args.next() else {
            return Err(BindError::BindVarsExceedArguments {
                arguments: consumed,
            });
        };
        let before = flat.len();
        flatten_into(arg, &mut flat);
        let expanded = flat.len() - before;
        if expanded == 0 {
            return Err(BindError::EmptyInExpansion { position: consumed });
        }
        rewritten.push_str(&placeholders(expanded));
        consumed += 1;
    }

    let leftover = args.count();
    if leftover > 0 {
        return Err(BindError::BindVarsLessThanArguments {
            bind_vars: consumed,
            arguments: consumed + leftover,
        });
    }
    debug!(
        placeholders = consumed,
        arguments = flat.len(),
        "rewrote IN-clause placeholders"
    );
    Ok((rewritten, flat))
}

/// Positional arguments collected while a query is assembled piecewise.
///
/// Each [`add`](Self::add) returns the placeholder text for the values it
/// appended, so callers can splice it straight into the query being built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    args: Vec<Arg>,
}

impl Arguments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten `arg`, append the result and return its placeholders.
    pub fn add(&mut self, arg: impl Into<Arg>) -> String {
        let merged = flatten(arg.into());
        let text = placeholders(merged.len());
        self.args.extend(merged);
        text
    }

    pub fn as_slice(&self) -> &[Arg] {
        &self.args
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn into_vec(self) -> Vec<Arg> {
        self.args
    }
}

impl From<Arguments> for Vec<Arg> {
    fn from(arguments: Arguments) -> Self {
        arguments.args
    }
}

impl IntoIterator for Arguments {
    type Item = Arg;
    type IntoIter = std::vec::IntoIter<Arg>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.into_iter()
    }
}
