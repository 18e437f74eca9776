// Allow must_use_candidate for matcher factory functions since returning the matcher
// without using it is the common pattern for test setup
#![allow(clippy::must_use_candidate)]

//! Ready-made matchers.
//!
//! Every factory returns a [`Value`] so it can be dropped straight into an
//! argument list. Combinator operands are values too: a plain value operand
//! is an equality check.

use crate::value::Value;

use super::Matcher;

// =============================================================================
// Built-in Matchers
// =============================================================================

/// Create a matcher that accepts any value in its position.
///
/// # Example
///
/// ```rust
/// use testkit_mock::{args, matcher::{anything, args_match}};
///
/// assert!(args_match(&args![anything()], &args![42]));
/// assert!(args_match(&args![anything()], &args!["x"]));
/// ```
pub fn anything() -> Value {
    Value::matcher(AnythingMatcher)
}

/// Matcher that matches anything.
pub struct AnythingMatcher;

impl Matcher<Value> for AnythingMatcher {
    fn matches(&self, _value: &Value) -> bool {
        true
    }

    fn describe(&self) -> String {
        "anything".to_string()
    }

    fn describe_mismatch(&self, _value: &Value) -> String {
        "matches anything".to_string()
    }
}

/// Create an equality matcher.
///
/// Mostly useful inside combinators, since a plain value already matches by
/// equality.
pub fn eq(expected: impl Into<Value>) -> Value {
    Value::matcher(EqMatcher {
        expected: expected.into(),
    })
}

/// Matcher for equality.
pub struct EqMatcher {
    expected: Value,
}

impl Matcher<Value> for EqMatcher {
    fn matches(&self, value: &Value) -> bool {
        value == &self.expected
    }

    fn describe(&self) -> String {
        format!("equals {}", self.expected)
    }

    fn describe_mismatch(&self, value: &Value) -> String {
        format!("{value} does not equal {}", self.expected)
    }
}

#[derive(Clone, Copy, Debug)]
enum Comparison {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    fn holds(self, value: f64, bound: f64) -> bool {
        match self {
            Self::Gt => value > bound,
            Self::Gte => value >= bound,
            Self::Lt => value < bound,
            Self::Lte => value <= bound,
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Self::Gt => "greater than",
            Self::Gte => "greater than or equal to",
            Self::Lt => "less than",
            Self::Lte => "less than or equal to",
        }
    }
}

/// Matcher for numeric ordering. Ints and floats compare with each other;
/// anything else never matches.
pub struct ComparisonMatcher {
    comparison: Comparison,
    bound: Value,
}

impl Matcher<Value> for ComparisonMatcher {
    fn matches(&self, value: &Value) -> bool {
        match (value.as_number(), self.bound.as_number()) {
            (Some(v), Some(bound)) => self.comparison.holds(v, bound),
            _ => false,
        }
    }

    fn describe(&self) -> String {
        format!("is {} {}", self.comparison.phrase(), self.bound)
    }

    fn describe_mismatch(&self, value: &Value) -> String {
        format!("{value} is not {} {}", self.comparison.phrase(), self.bound)
    }
}

fn comparison(comparison: Comparison, bound: Value) -> Value {
    Value::matcher(ComparisonMatcher { comparison, bound })
}

/// Create a greater-than matcher.
///
/// # Example
///
/// ```rust
/// use testkit_mock::{matcher::{gt, matches}, Value};
///
/// let m = gt(10);
/// assert!(matches(&m, &Value::Int(20)));
/// assert!(matches(&m, &Value::Float(10.5)));
/// assert!(!matches(&m, &Value::Int(5)));
/// ```
pub fn gt(bound: impl Into<Value>) -> Value {
    comparison(Comparison::Gt, bound.into())
}

/// Create a greater-than-or-equal matcher.
pub fn gte(bound: impl Into<Value>) -> Value {
    comparison(Comparison::Gte, bound.into())
}

/// Create a less-than matcher.
pub fn lt(bound: impl Into<Value>) -> Value {
    comparison(Comparison::Lt, bound.into())
}

/// Create a less-than-or-equal matcher.
pub fn lte(bound: impl Into<Value>) -> Value {
    comparison(Comparison::Lte, bound.into())
}

#[derive(Clone, Copy, Debug)]
enum TextMode {
    Contains,
    StartsWith,
    EndsWith,
}

/// Matcher for string contents. Non-strings never match.
pub struct TextMatcher {
    mode: TextMode,
    needle: String,
}

impl TextMatcher {
    fn phrase(&self) -> (&'static str, &'static str) {
        match self.mode {
            TextMode::Contains => ("contains", "does not contain"),
            TextMode::StartsWith => ("starts with", "does not start with"),
            TextMode::EndsWith => ("ends with", "does not end with"),
        }
    }
}

impl Matcher<Value> for TextMatcher {
    fn matches(&self, value: &Value) -> bool {
        value.as_str().is_some_and(|s| match self.mode {
            TextMode::Contains => s.contains(&self.needle),
            TextMode::StartsWith => s.starts_with(&self.needle),
            TextMode::EndsWith => s.ends_with(&self.needle),
        })
    }

    fn describe(&self) -> String {
        format!("{} {:?}", self.phrase().0, self.needle)
    }

    fn describe_mismatch(&self, value: &Value) -> String {
        format!("{value} {} {:?}", self.phrase().1, self.needle)
    }
}

fn text(mode: TextMode, needle: &str) -> Value {
    Value::matcher(TextMatcher {
        mode,
        needle: needle.to_string(),
    })
}

/// Create a substring contains matcher for strings.
///
/// # Example
///
/// ```rust
/// use testkit_mock::{matcher::{contains_str, matches}, Value};
///
/// let m = contains_str("world");
/// assert!(matches(&m, &Value::from("hello world")));
/// assert!(!matches(&m, &Value::from("hello")));
/// ```
pub fn contains_str(substring: &str) -> Value {
    text(TextMode::Contains, substring)
}

/// Create a starts-with matcher for strings.
pub fn starts_with(prefix: &str) -> Value {
    text(TextMode::StartsWith, prefix)
}

/// Create an ends-with matcher for strings.
pub fn ends_with(suffix: &str) -> Value {
    text(TextMode::EndsWith, suffix)
}

/// Create a length matcher for strings, lists and maps.
pub fn has_length(length: usize) -> Value {
    Value::matcher(HasLengthMatcher { length })
}

/// Matcher for collection length.
pub struct HasLengthMatcher {
    length: usize,
}

impl Matcher<Value> for HasLengthMatcher {
    fn matches(&self, value: &Value) -> bool {
        value.len() == Some(self.length)
    }

    fn describe(&self) -> String {
        format!("has length {}", self.length)
    }

    fn describe_mismatch(&self, value: &Value) -> String {
        match value.len() {
            Some(len) => format!("{value} has length {len}, expected {}", self.length),
            None => format!("{value} has no length"),
        }
    }
}

/// Create an emptiness matcher for strings, lists and maps.
pub fn is_empty() -> Value {
    Value::matcher(IsEmptyMatcher)
}

/// Matcher for empty collections.
pub struct IsEmptyMatcher;

impl Matcher<Value> for IsEmptyMatcher {
    fn matches(&self, value: &Value) -> bool {
        value.len() == Some(0)
    }

    fn describe(&self) -> String {
        "is empty".to_string()
    }

    fn describe_mismatch(&self, value: &Value) -> String {
        format!("{value} is not empty")
    }
}

/// Create a matcher for lists containing an element.
///
/// The element may itself be a matcher.
///
/// # Example
///
/// ```rust
/// use testkit_mock::{matcher::{contains, gt, matches}, Value};
///
/// assert!(matches(&contains(2), &Value::from(vec![1, 2, 3])));
/// assert!(matches(&contains(gt(2)), &Value::from(vec![1, 2, 3])));
/// assert!(!matches(&contains(4), &Value::from(vec![1, 2, 3])));
/// ```
pub fn contains(element: impl Into<Value>) -> Value {
    Value::matcher(ContainsMatcher {
        element: element.into(),
    })
}

/// Matcher for list membership.
pub struct ContainsMatcher {
    element: Value,
}

impl Matcher<Value> for ContainsMatcher {
    fn matches(&self, value: &Value) -> bool {
        value
            .as_list()
            .is_some_and(|items| items.iter().any(|item| self.element.matches(item)))
    }

    fn describe(&self) -> String {
        format!("contains {}", self.element)
    }

    fn describe_mismatch(&self, value: &Value) -> String {
        format!("{value} does not contain {}", self.element)
    }
}

/// Create a matcher for values of one kind (see [`Value::kind`]).
///
/// # Example
///
/// ```rust
/// use testkit_mock::{matcher::{matches, of_kind}, Value};
///
/// assert!(matches(&of_kind("string"), &Value::from("x")));
/// assert!(!matches(&of_kind("string"), &Value::Int(1)));
/// ```
pub fn of_kind(kind: &'static str) -> Value {
    Value::matcher(KindMatcher { kind })
}

/// Matcher for value kinds.
pub struct KindMatcher {
    kind: &'static str,
}

impl Matcher<Value> for KindMatcher {
    fn matches(&self, value: &Value) -> bool {
        value.kind() == self.kind
    }

    fn describe(&self) -> String {
        format!("any {}", self.kind)
    }

    fn describe_mismatch(&self, value: &Value) -> String {
        format!("{value} is a {}, not a {}", value.kind(), self.kind)
    }
}

/// Create a predicate-based matcher.
///
/// # Example
///
/// ```rust
/// use testkit_mock::{matcher::{matches, satisfies}, Value};
///
/// let m = satisfies(|v| v.as_int().is_some_and(|i| i % 2 == 0), "is even");
/// assert!(matches(&m, &Value::Int(4)));
/// assert!(!matches(&m, &Value::Int(3)));
/// ```
pub fn satisfies<F>(predicate: F, description: &str) -> Value
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Value::matcher(PredicateMatcher {
        predicate,
        description: description.to_string(),
    })
}

/// Matcher based on a predicate function.
pub struct PredicateMatcher<F> {
    predicate: F,
    description: String,
}

impl<F: Fn(&Value) -> bool> Matcher<Value> for PredicateMatcher<F> {
    fn matches(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }

    fn describe_mismatch(&self, value: &Value) -> String {
        format!("{value} does not satisfy: {}", self.description)
    }
}

// =============================================================================
// Combinators
// =============================================================================

fn describe_all(matchers: &[Value]) -> String {
    let descriptions: Vec<_> = matchers.iter().map(|m| m.describe()).collect();
    descriptions.join(", ")
}

/// Create a matcher that matches when all operands match.
///
/// # Example
///
/// ```rust
/// use testkit_mock::{matcher::{all_of, gt, lt, matches}, Value};
///
/// let m = all_of(vec![gt(0), lt(100)]);
/// assert!(matches(&m, &Value::Int(50)));
/// assert!(!matches(&m, &Value::Int(100)));
/// ```
pub fn all_of(matchers: Vec<Value>) -> Value {
    Value::matcher(AllOfMatcher { matchers })
}

/// Matcher that requires all inner matchers to match.
pub struct AllOfMatcher {
    matchers: Vec<Value>,
}

impl Matcher<Value> for AllOfMatcher {
    fn matches(&self, value: &Value) -> bool {
        self.matchers.iter().all(|m| m.matches(value))
    }

    fn describe(&self) -> String {
        format!("all of [{}]", describe_all(&self.matchers))
    }

    fn describe_mismatch(&self, value: &Value) -> String {
        let failures: Vec<_> = self
            .matchers
            .iter()
            .filter(|m| !m.matches(value))
            .map(|m| m.describe_mismatch(value))
            .collect();
        format!("failed: {}", failures.join("; "))
    }
}

/// Create a matcher that matches when any operand matches.
///
/// # Example
///
/// ```rust
/// use testkit_mock::{matcher::{any_of, matches}, Value};
///
/// let m = any_of(vec![Value::Int(1), Value::from("one")]);
/// assert!(matches(&m, &Value::from("one")));
/// assert!(!matches(&m, &Value::Int(2)));
/// ```
pub fn any_of(matchers: Vec<Value>) -> Value {
    Value::matcher(AnyOfMatcher { matchers })
}

/// Matcher that requires at least one inner matcher to match.
pub struct AnyOfMatcher {
    matchers: Vec<Value>,
}

impl Matcher<Value> for AnyOfMatcher {
    fn matches(&self, value: &Value) -> bool {
        self.matchers.iter().any(|m| m.matches(value))
    }

    fn describe(&self) -> String {
        format!("any of [{}]", describe_all(&self.matchers))
    }

    fn describe_mismatch(&self, value: &Value) -> String {
        format!(
            "{value} matched none of [{}]",
            describe_all(&self.matchers)
        )
    }
}

/// Create a negating matcher.
pub fn not(matcher: impl Into<Value>) -> Value {
    Value::matcher(NotMatcher {
        inner: matcher.into(),
    })
}

/// Matcher that negates another matcher.
pub struct NotMatcher {
    inner: Value,
}

impl Matcher<Value> for NotMatcher {
    fn matches(&self, value: &Value) -> bool {
        !self.inner.matches(value)
    }

    fn describe(&self) -> String {
        format!("not {}", self.inner.describe())
    }

    fn describe_mismatch(&self, value: &Value) -> String {
        format!("{value} unexpectedly matched: {}", self.inner.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::matches;

    #[test]
    fn test_anything_matcher() {
        let m = anything();
        assert!(matches(&m, &Value::Int(42)));
        assert!(matches(&m, &Value::Undef));
        assert!(matches(&m, &Value::from(vec![1])));
    }

    #[test]
    fn test_eq_matcher() {
        let m = eq("a");
        assert!(matches(&m, &Value::from("a")));
        assert!(!matches(&m, &Value::from("b")));
    }

    #[test]
    fn test_comparison_matchers() {
        assert!(matches(&gt(10), &Value::Int(11)));
        assert!(!matches(&gt(10), &Value::Int(10)));
        assert!(matches(&gte(10), &Value::Int(10)));
        assert!(matches(&lt(1.5), &Value::Int(1)));
        assert!(matches(&lte(2), &Value::Float(2.0)));
        assert!(!matches(&gt(0), &Value::from("1")));
    }

    #[test]
    fn test_text_matchers() {
        assert!(matches(&contains_str("ell"), &Value::from("hello")));
        assert!(matches(&starts_with("he"), &Value::from("hello")));
        assert!(!matches(&starts_with("lo"), &Value::from("hello")));
        assert!(matches(&ends_with("lo"), &Value::from("hello")));
        assert!(!matches(&ends_with("lo"), &Value::Int(10)));
    }

    #[test]
    fn test_length_matchers() {
        assert!(matches(&has_length(3), &Value::from(vec![1, 2, 3])));
        assert!(matches(&has_length(2), &Value::from("ab")));
        assert!(!matches(&has_length(2), &Value::Int(12)));
        assert!(matches(&is_empty(), &Value::from(Vec::<i32>::new())));
        assert!(matches(&is_empty(), &Value::from("")));
        assert!(!matches(&is_empty(), &Value::Undef));
    }

    #[test]
    fn test_kind_matcher() {
        assert!(matches(&of_kind("int"), &Value::Int(1)));
        assert!(!matches(&of_kind("int"), &Value::Float(1.0)));
    }

    #[test]
    fn test_combinators() {
        let m = any_of(vec![all_of(vec![gt(0), lt(100)]), Value::Int(200)]);
        assert!(matches(&m, &Value::Int(50)));
        assert!(matches(&m, &Value::Int(200)));
        assert!(!matches(&m, &Value::Int(150)));

        let m = not(Value::Int(0));
        assert!(matches(&m, &Value::Int(1)));
        assert!(!matches(&m, &Value::Int(0)));
    }

    #[test]
    fn test_matcher_describe() {
        assert_eq!(anything().describe(), "anything");
        assert_eq!(eq(42).describe(), "equals 42");
        assert_eq!(gte(1).describe(), "is greater than or equal to 1");
        assert_eq!(contains_str("x").describe(), "contains \"x\"");
        assert_eq!(has_length(3).describe(), "has length 3");
        assert_eq!(not(eq(0)).describe(), "not equals 0");
        assert_eq!(
            all_of(vec![gt(0), Value::Int(5)]).describe(),
            "all of [is greater than 0, equals 5]"
        );
        assert_eq!(of_kind("map").describe(), "any map");
    }

    #[test]
    fn test_matcher_describe_mismatch() {
        assert!(eq(42)
            .describe_mismatch(&Value::Int(0))
            .contains("does not equal"));
        assert!(gt(10)
            .describe_mismatch(&Value::Int(5))
            .contains("not greater than"));
        assert_eq!(
            has_length(2).describe_mismatch(&Value::from("abc")),
            "\"abc\" has length 3, expected 2"
        );
    }
}
