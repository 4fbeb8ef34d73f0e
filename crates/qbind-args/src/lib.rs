//! Argument handling for runtime query binding.
//!
//! - [`merge_args`] / [`merge_named_args`] flatten call-site arguments.
//! - [`rewrite_in`] expands `IN (?)` placeholders to match flattened
//!   collections.
//! - [`rebind`] converts `?` placeholders to a driver's numbered style.

pub mod bindvars;
pub mod flatten;
pub mod rebind;

pub use bindvars::{
    Arguments, MAX_BIND_VARS, bind_vars, placeholder_count, placeholders, rewrite_in,
    rewrite_in_with,
};
pub use flatten::{flatten, merge_args, merge_named_args};
pub use rebind::{rebind, rebind_with};
