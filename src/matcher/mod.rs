//! Argument matching.
//!
//! Stubs and verifications describe the calls they care about with an
//! expected argument list. A plain [`Value`] in that list matches by deep
//! equality; a matcher value (see [`Value::matcher`] and the ready-made
//! matchers in this module) matches any argument it accepts.
//!
//! - [`Matcher`] trait for custom matchers
//! - Built-in matchers: [`anything`], [`eq`], [`gt`], [`contains_str`], etc.
//! - Combinators: [`all_of`], [`any_of`], [`not`]
//!
//! # Example
//!
//! ```rust
//! use testkit_mock::{args, matcher::{args_match, anything, gt}};
//!
//! assert!(args_match(&args![1, anything()], &args![1, "x"]));
//! assert!(args_match(&args![gt(10)], &args![11]));
//! assert!(!args_match(&args![anything()], &args![1, 2]));
//! ```

mod builtin;

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

pub use builtin::{
    all_of, any_of, anything, contains, contains_str, ends_with, eq, gt, gte, has_length,
    is_empty, lt, lte, not, of_kind, satisfies, starts_with,
};

/// A matcher for testing values.
///
/// # Implementing Custom Matchers
///
/// ```rust
/// use testkit_mock::{matcher::{matches, Matcher}, Value};
///
/// struct IsEven;
///
/// impl Matcher<Value> for IsEven {
///     fn matches(&self, value: &Value) -> bool {
///         value.as_int().is_some_and(|i| i % 2 == 0)
///     }
///
///     fn describe(&self) -> String {
///         "is even".to_string()
///     }
///
///     fn describe_mismatch(&self, value: &Value) -> String {
///         format!("{value} is not even")
///     }
/// }
///
/// let even = Value::matcher(IsEven);
/// assert!(matches(&even, &Value::Int(4)));
/// assert!(!matches(&even, &Value::Int(3)));
/// ```
pub trait Matcher<T: ?Sized> {
    /// Check if the value matches.
    fn matches(&self, value: &T) -> bool;

    /// Describe what this matcher expects.
    fn describe(&self) -> String;

    /// Describe why a value didn't match.
    fn describe_mismatch(&self, value: &T) -> String;
}

/// A shared matcher held inside [`Value::Matcher`].
///
/// Clones refer to the same matcher; two `ArgMatcher`s are equal only when
/// they are clones of one another.
#[derive(Clone)]
pub struct ArgMatcher {
    inner: Arc<dyn Matcher<Value> + Send + Sync>,
}

impl ArgMatcher {
    /// Share a matcher.
    pub fn new<M>(matcher: M) -> Self
    where
        M: Matcher<Value> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(matcher),
        }
    }

    /// Check whether both handles refer to the same matcher.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.inner).cast::<()>(),
            Arc::as_ptr(&other.inner).cast::<()>(),
        )
    }
}

impl Matcher<Value> for ArgMatcher {
    fn matches(&self, value: &Value) -> bool {
        self.inner.matches(value)
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }

    fn describe_mismatch(&self, value: &Value) -> String {
        self.inner.describe_mismatch(value)
    }
}

impl fmt::Debug for ArgMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArgMatcher")
            .field(&self.inner.describe())
            .finish()
    }
}

// A plain value used as a matcher is an equality check, unless it wraps one.
impl Matcher<Value> for Value {
    fn matches(&self, value: &Value) -> bool {
        matches(self, value)
    }

    fn describe(&self) -> String {
        match self {
            Value::Matcher(m) => m.describe(),
            other => format!("equals {other}"),
        }
    }

    fn describe_mismatch(&self, value: &Value) -> String {
        match self {
            Value::Matcher(m) => m.describe_mismatch(value),
            other => format!("{value} does not equal {other}"),
        }
    }
}

/// Match one actual value against an expected value or matcher.
#[must_use]
pub fn matches(expected: &Value, actual: &Value) -> bool {
    match expected {
        Value::Matcher(m) => m.matches(actual),
        _ => expected == actual,
    }
}

/// Match an actual argument list against an expected one.
///
/// Lists of different length never match.
#[must_use]
pub fn args_match(expected: &[Value], actual: &[Value]) -> bool {
    expected.len() == actual.len()
        && expected
            .iter()
            .zip(actual)
            .all(|(expected, actual)| matches(expected, actual))
}

/// Assert that a value matches a matcher.
///
/// # Panics
///
/// Panics with a descriptive message if the value doesn't match.
///
/// # Example
///
/// ```rust
/// use testkit_mock::{assert_that, matcher::gt, Value};
///
/// assert_that!(Value::Int(42), gt(40));
/// assert_that!(Value::Int(42), Value::Int(42));
/// ```
#[macro_export]
macro_rules! assert_that {
    ($value:expr, $matcher:expr) => {{
        let value: &$crate::Value = &$value;
        let matcher: &$crate::Value = &$matcher;
        if !$crate::matcher::Matcher::matches(matcher, value) {
            panic!(
                "assertion failed: {}\n  expected: {}\n  got: {}",
                $crate::matcher::Matcher::describe_mismatch(matcher, value),
                $crate::matcher::Matcher::describe(matcher),
                value
            );
        }
    }};
    ($value:expr, $matcher:expr, $($arg:tt)+) => {{
        let value: &$crate::Value = &$value;
        let matcher: &$crate::Value = &$matcher;
        if !$crate::matcher::Matcher::matches(matcher, value) {
            panic!(
                "assertion failed: {}\n  expected: {}\n  got: {}\n  message: {}",
                $crate::matcher::Matcher::describe_mismatch(matcher, value),
                $crate::matcher::Matcher::describe(matcher),
                value,
                format_args!($($arg)+)
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[test]
    fn test_plain_values_match_by_equality() {
        assert!(matches(&Value::Int(1), &Value::Int(1)));
        assert!(!matches(&Value::Int(1), &Value::Int(2)));
        assert!(!matches(&Value::Int(1), &Value::Float(1.0)));
        assert!(matches(&Value::from(vec![1, 2]), &Value::from(vec![1, 2])));
    }

    #[test]
    fn test_matcher_values_delegate() {
        let m = gt(3);
        assert!(matches(&m, &Value::Int(4)));
        assert!(!matches(&m, &Value::Int(3)));
    }

    #[test]
    fn test_args_match_requires_equal_length() {
        assert!(args_match(&[], &[]));
        assert!(args_match(&args![1, 2], &args![1, 2]));
        assert!(!args_match(&args![1], &args![1, 2]));
        assert!(!args_match(&args![anything()], &[]));
        assert!(args_match(&args![anything(), 2], &args!["x", 2]));
        assert!(!args_match(&args![anything(), 2], &args!["x", 3]));
    }

    #[test]
    fn test_nested_matchers_are_not_applied() {
        let expected = Value::List(vec![anything()]);
        assert!(!matches(&expected, &Value::from(vec![1])));
    }

    #[test]
    fn test_arg_matcher_identity() {
        let a = anything();
        let b = anything();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_value_as_matcher_descriptions() {
        assert_eq!(Value::Int(3).describe(), "equals 3");
        assert_eq!(
            Value::Int(3).describe_mismatch(&Value::Int(4)),
            "4 does not equal 3"
        );
        assert_eq!(gt(3).describe(), "is greater than 3");
    }

    #[test]
    fn test_assert_that_macro() {
        assert_that!(Value::Int(50), all_of(vec![gt(0), lt(100)]));
        assert_that!(Value::from("hello"), contains_str("ell"), "greeting");
    }

    #[test]
    #[should_panic(expected = "does not equal")]
    fn test_assert_that_fails() {
        assert_that!(Value::Int(42), Value::Int(0));
    }

    #[test]
    fn test_debug_shows_description() {
        let Value::Matcher(m) = lt(2) else {
            unreachable!("lt returns a matcher value");
        };
        assert_eq!(format!("{m:?}"), "ArgMatcher(\"is less than 2\")");
    }
}
