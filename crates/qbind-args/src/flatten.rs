//! Argument flattening.
//!
//! Positional arguments are expanded depth-first into one ordered list.
//! Named arguments are expanded into one flat name-to-value map, with
//! struct-like values contributing one entry per tagged field.

use qbind_error::{BindError, Result};
use qbind_types::{Arg, NamedArgs, Record, leading_ident};
use tracing::trace;

/// Flatten positional arguments.
///
/// In priority order, each argument is: dropped if it opts out; replaced by
/// its flattened positional expansion; kept whole if it is driver-native;
/// expanded element by element if it is a sequence; kept as-is otherwise.
/// Byte sequences are scalars.
pub fn merge_args<I>(args: I) -> Vec<Arg>
where
    I: IntoIterator<Item = Arg>,
{
    let mut out = Vec::new();
    for arg in args {
        flatten_into(arg, &mut out);
    }
    out
}

/// Flatten a single argument.
pub fn flatten(arg: Arg) -> Vec<Arg> {
    let mut out = Vec::new();
    flatten_into(arg, &mut out);
    out
}

pub(crate) fn flatten_into(arg: Arg, out: &mut Vec<Arg>) {
    match arg {
        Arg::Custom(custom) => {
            if custom.not_an_arg() {
                return;
            }
            if let Some(items) = custom.to_args() {
                trace!(count = items.len(), "custom positional expansion");
                for item in items {
                    flatten_into(item, out);
                }
                return;
            }
            out.push(Arg::Custom(custom));
        }
        Arg::Seq(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        other => out.push(other),
    }
}

/// Flatten named arguments.
///
/// In priority order, each entry is: dropped if it opts out; replaced by its
/// named expansion; kept under its key if it is driver-native or has a
/// positional expansion; merged key by key if it is a map (non-text keys
/// ignored); expanded into its tagged fields if it is a record; kept under
/// its key otherwise. Later entries overwrite earlier ones.
///
/// # Errors
///
/// [`BindError::InvalidBindTag`] for a tag without a leading identifier and
/// [`BindError::TypeMismatch`] for an embedded field that is not a record.
pub fn merge_named_args<K, I>(args: I) -> Result<NamedArgs>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Arg)>,
{
    let mut out = NamedArgs::new();
    for (key, arg) in args {
        merge_named(key.into(), arg, &mut out)?;
    }
    Ok(out)
}

fn merge_named(key: String, arg: Arg, out: &mut NamedArgs) -> Result<()> {
    match arg {
        Arg::Custom(custom) => {
            if custom.not_an_arg() {
                return Ok(());
            }
            if let Some(named) = custom.to_named_args() {
                trace!(key = %key, count = named.len(), "custom named expansion");
                out.extend(named);
                return Ok(());
            }
            if custom.as_valuer().is_none() && custom.to_args().is_none() {
                if let Some(record) = custom.to_record() {
                    return merge_record(record, out);
                }
            }
            out.insert(key, Arg::Custom(custom));
        }
        Arg::Map(entries) => {
            for (k, v) in entries {
                if let Arg::Text(k) = k {
                    out.insert(k, v);
                }
            }
        }
        Arg::Record(record) => merge_record(record, out)?,
        other => {
            out.insert(key, other);
        }
    }
    Ok(())
}

fn merge_record(record: Record, out: &mut NamedArgs) -> Result<()> {
    for field in record.into_fields() {
        if field.embedded {
            match field.value {
                Arg::Null => {}
                Arg::Record(inner) => merge_record(inner, out)?,
                Arg::Custom(custom) => match custom.to_record() {
                    Some(inner) => merge_record(inner, out)?,
                    None => return Err(BindError::type_mismatch(field.name, "record", "custom")),
                },
                other => {
                    return Err(BindError::type_mismatch(
                        field.name,
                        "record",
                        other.kind_name(),
                    ));
                }
            }
            continue;
        }
        let Some(tag) = field.tag else {
            continue;
        };
        if tag == "-" {
            continue;
        }
        let name = leading_ident(&tag);
        if name.is_empty() {
            return Err(BindError::InvalidBindTag { tag });
        }
        out.insert(name.to_owned(), field.value);
    }
    Ok(())
}
