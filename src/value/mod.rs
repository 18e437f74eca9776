//! Dynamic argument and return values.
//!
//! Every argument passed to a mocked operation, every canned return value and
//! every raised error is a [`Value`]. Equality is structural: lists and maps
//! compare element-wise, values of different kinds never compare equal.
//!
//! # Example
//!
//! ```rust
//! use testkit_mock::{args, Value};
//!
//! let args = args![1, "two", vec![3, 4]];
//! assert_eq!(args[0], Value::Int(1));
//! assert_eq!(args[1].to_string(), "\"two\"");
//! assert_eq!(args[2].to_string(), "[3, 4]");
//! ```

mod convert;

use std::collections::BTreeMap;
use std::fmt;

use crate::matcher::{ArgMatcher, Matcher};
use crate::mock::Mock;

pub use convert::FromValue;

/// A dynamically typed value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    Undef,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number. NaN equals NaN, so a NaN argument can be
    /// stubbed and verified like any other.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered sequence.
    List(Vec<Value>),
    /// A string-keyed mapping.
    Map(BTreeMap<String, Value>),
    /// A mock object, compared by identity.
    Mock(Mock),
    /// A matcher standing in for any value it accepts.
    Matcher(ArgMatcher),
}

impl Value {
    /// Wrap a matcher so it can be used in an argument position.
    pub fn matcher<M>(matcher: M) -> Self
    where
        M: Matcher<Value> + Send + Sync + 'static,
    {
        Self::Matcher(ArgMatcher::new(matcher))
    }

    /// Name of this value's kind, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Undef => "undef",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Mock(_) => "mock",
            Self::Matcher(_) => "matcher",
        }
    }

    /// Check whether this is the absent value.
    #[must_use]
    pub fn is_undef(&self) -> bool {
        matches!(self, Self::Undef)
    }

    /// The integer inside, if any.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The string inside, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The list inside, if any.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The mock inside, if any.
    #[must_use]
    pub fn as_mock(&self) -> Option<&Mock> {
        match self {
            Self::Mock(mock) => Some(mock),
            _ => None,
        }
    }

    /// Numeric view of ints and floats, for ordering comparisons.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Length of a string, list or map.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Str(s) => Some(s.chars().count()),
            Self::List(items) => Some(items.len()),
            Self::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undef, Self::Undef) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Mock(a), Self::Mock(b)) => a.same_as(b),
            (Self::Matcher(a), Self::Matcher(b)) => a.same_as(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undef => f.write_str("undef"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                write_joined(f, items)?;
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Mock(mock) => write!(f, "{mock}"),
            Self::Matcher(matcher) => f.write_str(&matcher.describe()),
        }
    }
}

/// Write values separated by `", "`.
pub(crate) fn write_joined(f: &mut fmt::Formatter<'_>, values: &[Value]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

/// Build an argument list, converting each element with [`Value::from`].
///
/// ```rust
/// use testkit_mock::{args, matcher::anything, Value};
///
/// let empty: Vec<Value> = args![];
/// assert!(empty.is_empty());
///
/// let list = args![1, "a", anything()];
/// assert_eq!(list.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}
