//! Extension points argument types may implement.
//!
//! The flattener consults these in a fixed priority order, so a type that
//! implements several capabilities behaves the same regardless of which
//! one a caller had in mind.

use std::fmt;

use crate::record::Record;
use crate::value::{Arg, NamedArgs};

/// A driver-native scalar.
///
/// Values exposing this capability are passed through flattening untouched,
/// even when their Rust representation is a collection (a wrapped byte
/// buffer, a JSON document, an array type the driver encodes natively).
pub trait Valuer: fmt::Debug + Send + Sync {
    /// Convert to the scalar the driver should bind.
    fn value(&self) -> Arg;
}

/// Custom argument behaviour.
///
/// Every method has a default that opts out of the capability, so an
/// implementation only overrides what it needs.
pub trait Argument: fmt::Debug + Send + Sync {
    /// Return `true` to be dropped from both positional and named argument
    /// lists. Useful for context values that travel alongside real
    /// arguments.
    fn not_an_arg(&self) -> bool {
        false
    }

    /// Positional expansion. The result is flattened again, so it may
    /// itself contain sequences or custom arguments.
    ///
    /// An implementation must not return itself; flattening would never
    /// terminate.
    fn to_args(&self) -> Option<Vec<Arg>> {
        None
    }

    /// Named expansion, merged key by key into the caller's named
    /// arguments.
    fn to_named_args(&self) -> Option<NamedArgs> {
        None
    }

    /// Driver-native view of this argument.
    fn as_valuer(&self) -> Option<&dyn Valuer> {
        None
    }

    /// Struct-like view: the tagged fields a named binding should see.
    fn to_record(&self) -> Option<Record> {
        None
    }
}
