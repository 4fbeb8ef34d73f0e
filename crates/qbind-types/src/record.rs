//! Struct-like arguments.
//!
//! A [`Record`] is the explicit stand-in for reflecting over a struct: the
//! type lists its fields, the binding tag of each, and which fields are
//! embedded (their own tagged fields are promoted into the parent).

use std::fmt;

use crate::value::Arg;

/// One field of a struct-like argument.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    /// Rust-side field name, used in diagnostics.
    pub name: String,
    /// Raw binding tag, e.g. `"name; charset=utf-8"`. Untagged fields are
    /// invisible to named binding.
    pub tag: Option<String>,
    /// Whether this field is embedded and should be flattened into the
    /// parent's namespace.
    pub embedded: bool,
    pub value: Arg,
}

impl Field {
    /// The binding name: the tag's leading identifier.
    pub fn bind_name(&self) -> Option<&str> {
        self.tag.as_deref().map(leading_ident)
    }
}

/// A struct-like argument: an ordered list of fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an untagged field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Arg>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            tag: None,
            embedded: false,
            value: value.into(),
        });
        self
    }

    /// Add a field carrying a binding tag.
    #[must_use]
    pub fn tagged(
        mut self,
        name: impl Into<String>,
        tag: impl Into<String>,
        value: impl Into<Arg>,
    ) -> Self {
        self.fields.push(Field {
            name: name.into(),
            tag: Some(tag.into()),
            embedded: false,
            value: value.into(),
        });
        self
    }

    /// Add an embedded field. `value` is expected to be a record (or
    /// `Null` for an absent one).
    #[must_use]
    pub fn embed(mut self, name: impl Into<String>, value: impl Into<Arg>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            tag: None,
            embedded: true,
            value: value.into(),
        });
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", field.name, field.value)?;
        }
        f.write_str("}")
    }
}

/// Strip trailing tag options: keep the prefix made of `[0-9A-Za-z_]`.
pub fn leading_ident(tag: &str) -> &str {
    let end = tag
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(tag.len());
    &tag[..end]
}
