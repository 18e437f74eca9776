//! What a mocked call hands back, and conversions into typed return values.

use crate::error::StubbedFailure;
use crate::value::{FromValue, Value};

/// Result of [`Mock::call`](super::Mock::call).
pub type Outcome = Result<Returned, StubbedFailure>;

/// Values returned by a mocked call.
///
/// A call may return several values. Callers that want one value use
/// [`scalar`](Self::scalar); callers that want all of them use
/// [`list`](Self::list).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Returned {
    values: Vec<Value>,
}

impl Returned {
    /// Wrap returned values.
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// The first returned value, or [`Value::Undef`] when nothing was returned.
    #[must_use]
    pub fn scalar(&self) -> Value {
        self.values.first().cloned().unwrap_or_default()
    }

    /// All returned values.
    #[must_use]
    pub fn list(&self) -> &[Value] {
        &self.values
    }

    /// Take all returned values.
    #[must_use]
    pub fn into_list(self) -> Vec<Value> {
        self.values
    }

    /// Check if nothing was returned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Conversion of a call outcome into a typed return value.
///
/// Used by the code `#[mockable]` generates; implement it to let generated
/// mocks return your own types.
pub trait FromOutcome: Sized {
    /// Convert the outcome.
    ///
    /// # Panics
    ///
    /// Implementations without an error channel panic when the outcome is a
    /// stubbed failure or holds a value of the wrong kind.
    fn from_outcome(outcome: Outcome) -> Self;
}

fn returned_or_panic(outcome: Outcome) -> Returned {
    match outcome {
        Ok(returned) => returned,
        Err(failure) => panic!("{failure}"),
    }
}

fn convert<T: FromValue>(value: &Value) -> T {
    match T::from_value(value) {
        Some(converted) => converted,
        None => panic!(
            "stubbed value {value} cannot be returned as {}",
            std::any::type_name::<T>()
        ),
    }
}

impl FromOutcome for () {
    fn from_outcome(outcome: Outcome) -> Self {
        returned_or_panic(outcome);
    }
}

impl FromOutcome for Returned {
    fn from_outcome(outcome: Outcome) -> Self {
        returned_or_panic(outcome)
    }
}

// Nothing returned maps to the type's default.
macro_rules! scalar_from_outcome {
    ($($ty:ty),*) => {
        $(
            impl FromOutcome for $ty {
                fn from_outcome(outcome: Outcome) -> Self {
                    let value = returned_or_panic(outcome).scalar();
                    if value.is_undef() {
                        Self::default()
                    } else {
                        convert(&value)
                    }
                }
            }
        )*
    };
}

scalar_from_outcome!(Value, bool, i32, i64, u32, u64, usize, f64, String);

impl<T: FromValue> FromOutcome for Option<T> {
    fn from_outcome(outcome: Outcome) -> Self {
        let value = returned_or_panic(outcome).scalar();
        if value.is_undef() {
            None
        } else {
            Some(convert(&value))
        }
    }
}

// A single list value is unpacked; otherwise every returned value is an element.
impl<T: FromValue> FromOutcome for Vec<T> {
    fn from_outcome(outcome: Outcome) -> Self {
        let values = returned_or_panic(outcome).into_list();
        match values.as_slice() {
            [Value::List(items)] => items.iter().map(convert).collect(),
            _ => values.iter().map(convert).collect(),
        }
    }
}

impl<T: FromOutcome, E: From<Value>> FromOutcome for Result<T, E> {
    fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Ok(returned) => Ok(T::from_outcome(Ok(returned))),
            Err(failure) => Err(E::from(failure.into_error())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    fn ok(values: Vec<Value>) -> Outcome {
        Ok(Returned::new(values))
    }

    fn raised(error: impl Into<Value>) -> Outcome {
        Err(StubbedFailure {
            operation: "op".to_string(),
            error: error.into(),
        })
    }

    #[derive(Debug, PartialEq)]
    struct AppError(String);

    impl From<Value> for AppError {
        fn from(value: Value) -> Self {
            Self(value.to_string())
        }
    }

    #[test]
    fn test_scalar_and_list_views() {
        let returned = Returned::new(args![1, 2]);
        assert_eq!(returned.scalar(), Value::Int(1));
        assert_eq!(returned.list().len(), 2);
        assert_eq!(Returned::default().scalar(), Value::Undef);
    }

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(i64::from_outcome(ok(args![7])), 7);
        assert_eq!(String::from_outcome(ok(args!["x"])), "x");
        assert!(bool::from_outcome(ok(args![true])));
        assert_eq!(f64::from_outcome(ok(args![2])), 2.0);
    }

    #[test]
    fn test_nothing_maps_to_default() {
        assert_eq!(i64::from_outcome(ok(args![])), 0);
        assert_eq!(String::from_outcome(ok(args![])), "");
        assert_eq!(Option::<i64>::from_outcome(ok(args![])), None);
        assert!(Vec::<i64>::from_outcome(ok(args![])).is_empty());
    }

    #[test]
    fn test_vec_conversions() {
        assert_eq!(Vec::<i64>::from_outcome(ok(args![1, 2])), vec![1, 2]);
        assert_eq!(
            Vec::<i64>::from_outcome(ok(args![vec![3, 4]])),
            vec![3, 4]
        );
    }

    #[test]
    fn test_result_conversions() {
        let value: Result<i64, AppError> = FromOutcome::from_outcome(ok(args![5]));
        assert_eq!(value, Ok(5));

        let value: Result<i64, AppError> = FromOutcome::from_outcome(raised("disk full"));
        assert_eq!(value, Err(AppError("\"disk full\"".to_string())));

        let value: Result<(), Value> = FromOutcome::from_outcome(raised(3));
        assert_eq!(value, Err(Value::Int(3)));
    }

    #[test]
    #[should_panic(expected = "`op` raised \"boom\"")]
    fn test_raise_without_error_channel_panics() {
        <()>::from_outcome(raised("boom"));
    }

    #[test]
    #[should_panic(expected = "cannot be returned as")]
    fn test_wrong_kind_panics() {
        let _ = i64::from_outcome(ok(args!["seven"]));
    }
}
