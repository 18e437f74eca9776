//! Conversions between Rust values and [`Value`].
//!
//! Integers become [`Value::Int`]. A `u64`, `usize` or `isize` outside the
//! `i64` range becomes a [`Value::Float`] instead: it stays distinct from
//! every int, at float precision.

use std::collections::BTreeMap;

use super::Value;
use crate::matcher::ArgMatcher;
use crate::mock::Mock;

macro_rules! from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

// Values beyond the `i64` range become floats, so they never compare equal
// to an in-range int.
macro_rules! from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[allow(clippy::cast_precision_loss)]
                fn from(value: $ty) -> Self {
                    match i64::try_from(value) {
                        Ok(i) => Self::Int(i),
                        Err(_) => Self::Float(value as f64),
                    }
                }
            }
        )*
    };
}

from_wide_int!(u64, usize, isize);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Undef, Into::into)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self::Map(entries)
    }
}

impl From<Mock> for Value {
    fn from(mock: Mock) -> Self {
        Self::Mock(mock)
    }
}

impl From<&Mock> for Value {
    fn from(mock: &Mock) -> Self {
        Self::Mock(mock.clone())
    }
}

impl From<ArgMatcher> for Value {
    fn from(matcher: ArgMatcher) -> Self {
        Self::Matcher(matcher)
    }
}

/// Extraction of a Rust value from a [`Value`].
///
/// Returns `None` when the value has the wrong kind or does not fit.
pub trait FromValue: Sized {
    /// Try to extract `Self`.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

macro_rules! from_value_int {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Option<Self> {
                    value.as_int().and_then(|i| <$ty>::try_from(i).ok())
                }
            }
        )*
    };
}

from_value_int!(i32, i64, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_number()
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(ToString::to_string)
    }
}

impl FromValue for Mock {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_mock().cloned()
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_list()?.iter().map(T::from_value).collect()
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Option<Self> {
        if value.is_undef() {
            Some(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}
