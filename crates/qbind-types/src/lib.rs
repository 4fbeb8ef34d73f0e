//! Value model shared by the qbind crates.
//!
//! Call sites hand qbind heterogeneous arguments. Rust has no runtime
//! reflection, so every argument is lowered into [`Arg`]: a closed set of
//! built-in shapes (scalars, byte sequences, sequences, maps, records) plus
//! two open extension points, [`Valuer`] for driver-native scalars and
//! [`Argument`] for types that want to control their own expansion.

pub mod capability;
pub mod dialect;
pub mod record;
pub mod value;

pub use capability::{Argument, Valuer};
pub use dialect::BindDialect;
pub use record::{Field, Record, leading_ident};
pub use value::{Arg, NamedArgs};

/// Construct a `Vec<Arg>` from heterogeneous values.
///
/// # Examples
///
/// ```
/// use qbind_types::{Arg, args};
///
/// let a = args![42_i64, "hello", [1, 2]];
/// assert_eq!(a.len(), 3);
/// assert_eq!(a[1], Arg::Text("hello".to_owned()));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($val:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($val)),+]
    };
}
