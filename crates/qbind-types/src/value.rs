use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::capability::{Argument, Valuer};
use crate::record::Record;

/// Named arguments: binding name to value. Last writer wins on collision.
pub type NamedArgs = HashMap<String, Arg>;

/// A call-site argument.
///
/// The variants are the closed set of shapes the flattener knows how to
/// take apart; anything else reaches it through [`Arg::Valuer`] or
/// [`Arg::Custom`].
#[derive(Clone, Debug)]
pub enum Arg {
    /// SQL NULL.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating-point number.
    Float(f64),
    /// A UTF-8 string.
    Text(String),
    /// A raw byte sequence. Always a single scalar, never flattened.
    Bytes(Vec<u8>),
    /// A sequence or fixed-size array. Flattened element by element.
    Seq(Vec<Arg>),
    /// A map-like value. Only `Text` keys take part in named binding.
    Map(Vec<(Arg, Arg)>),
    /// A struct-like value.
    Record(Record),
    /// A driver-native scalar.
    Valuer(Arc<dyn Valuer>),
    /// A value with custom expansion behaviour.
    Custom(Arc<dyn Argument>),
}

impl Arg {
    /// Wrap a driver-native scalar.
    pub fn valuer(v: impl Valuer + 'static) -> Self {
        Self::Valuer(Arc::new(v))
    }

    /// Wrap a custom argument.
    pub fn custom(a: impl Argument + 'static) -> Self {
        Self::Custom(Arc::new(a))
    }

    /// Build a sequence from anything convertible.
    pub fn seq<T: Into<Self>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Build a map from string keys.
    pub fn map<K: Into<String>, V: Into<Self>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (Self::Text(k.into()), v.into()))
                .collect(),
        )
    }

    /// Returns true if this is a NULL value.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Return the string if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Return the elements if this is a sequence.
    pub fn as_seq(&self) -> Option<&[Self]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the shape, for diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::UInt(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Seq(_) => "sequence",
            Self::Map(_) => "map",
            Self::Record(_) => "record",
            Self::Valuer(_) => "valuer",
            Self::Custom(_) => "custom",
        }
    }
}

impl PartialEq for Arg {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Seq(a), Self::Seq(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            // Opaque values compare by identity.
            (Self::Valuer(a), Self::Valuer(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            (Self::Custom(a), Self::Custom(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            _ => false,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "'{s}'"),
            Self::Bytes(b) => {
                f.write_str("X'")?;
                for byte in b {
                    write!(f, "{byte:02X}")?;
                }
                f.write_str("'")
            }
            Self::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Self::Record(r) => write!(f, "{r}"),
            Self::Valuer(v) => write!(f, "{v:?}"),
            Self::Custom(c) => write!(f, "{c:?}"),
        }
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Arg {
            fn from(v: $t) -> Self {
                Self::Int(i64::from(v))
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Arg {
            fn from(v: $t) -> Self {
                Self::UInt(u64::from(v))
            }
        }
    )*};
}

// No `u8`: `Vec<u8>` must stay bytes, not a sequence.
from_signed!(i8, i16, i32, i64);
from_unsigned!(u16, u32, u64);

impl From<isize> for Arg {
    fn from(v: isize) -> Self {
        Self::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<usize> for Arg {
    fn from(v: usize) -> Self {
        Self::UInt(u64::try_from(v).unwrap_or(u64::MAX))
    }
}

impl From<bool> for Arg {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f32> for Arg {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<Vec<u8>> for Arg {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<&[u8]> for Arg {
    fn from(b: &[u8]) -> Self {
        Self::Bytes(b.to_vec())
    }
}

impl From<Vec<Self>> for Arg {
    fn from(items: Vec<Self>) -> Self {
        Self::Seq(items)
    }
}

macro_rules! from_vec {
    ($($t:ty),*) => {$(
        impl From<Vec<$t>> for Arg {
            fn from(items: Vec<$t>) -> Self {
                Self::seq(items)
            }
        }
    )*};
}

from_vec!(
    i8, i16, i32, i64, isize, u16, u32, u64, usize, bool, f32, f64, String, &str
);

impl<T: Into<Self>, const N: usize> From<[T; N]> for Arg {
    fn from(items: [T; N]) -> Self {
        Self::seq(items)
    }
}

impl<T: Into<Self>> From<Option<T>> for Arg {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl<V: Into<Self>> From<HashMap<String, V>> for Arg {
    fn from(m: HashMap<String, V>) -> Self {
        Self::map(m)
    }
}

impl<V: Into<Self>> From<BTreeMap<String, V>> for Arg {
    fn from(m: BTreeMap<String, V>) -> Self {
        Self::map(m)
    }
}

impl From<Record> for Arg {
    fn from(r: Record) -> Self {
        Self::Record(r)
    }
}

impl<T: Into<Self>> FromIterator<T> for Arg {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::seq(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Marker;

    impl Argument for Marker {}

    #[test]
    fn integer_conversions() {
        assert_eq!(Arg::from(7_i8), Arg::Int(7));
        assert_eq!(Arg::from(-3_i32), Arg::Int(-3));
        assert_eq!(Arg::from(9_u32), Arg::UInt(9));
        assert_eq!(Arg::from(12_usize), Arg::UInt(12));
    }

    #[test]
    fn bytes_are_not_sequences() {
        assert_eq!(Arg::from(b"test".to_vec()), Arg::Bytes(b"test".to_vec()));
        assert_eq!(Arg::from(&b"ab"[..]), Arg::Bytes(b"ab".to_vec()));
        assert_eq!(
            Arg::from(vec![1_i64, 2]),
            Arg::Seq(vec![Arg::Int(1), Arg::Int(2)])
        );
    }

    #[test]
    fn arrays_become_sequences() {
        assert_eq!(
            Arg::from([true, false]),
            Arg::Seq(vec![Arg::Bool(true), Arg::Bool(false)])
        );
    }

    #[test]
    fn option_none_is_null() {
        assert!(Arg::from(None::<i64>).is_null());
        assert_eq!(Arg::from(Some("x")), Arg::Text("x".to_owned()));
    }

    #[test]
    fn map_keeps_text_keys() {
        let mut m = BTreeMap::new();
        m.insert("one".to_owned(), 1_i64);
        let Arg::Map(entries) = Arg::from(m) else {
            panic!("expected map");
        };
        assert_eq!(entries, vec![(Arg::Text("one".to_owned()), Arg::Int(1))]);
    }

    #[test]
    fn custom_compares_by_identity() {
        let a = Arg::custom(Marker);
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, Arg::custom(Marker));
    }

    #[test]
    fn collect_into_seq() {
        let arg: Arg = (1..=3_i64).collect();
        assert_eq!(arg.as_seq().map(<[Arg]>::len), Some(3));
    }

    #[test]
    fn display() {
        assert_eq!(Arg::Null.to_string(), "NULL");
        assert_eq!(Arg::from("hi").to_string(), "'hi'");
        assert_eq!(Arg::from(vec![0xCA_u8, 0xFE]).to_string(), "X'CAFE'");
        assert_eq!(Arg::from([1, 2]).to_string(), "[1, 2]");
    }

    #[test]
    fn kind_names() {
        assert_eq!(Arg::from(1.5).kind_name(), "float");
        assert_eq!(Arg::Record(Record::new()).kind_name(), "record");
    }
}
