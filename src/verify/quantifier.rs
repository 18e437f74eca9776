//! How many matching calls a verification expects.

use std::fmt;

use crate::error::{Result, UsageError};
use crate::matcher::{ArgMatcher, Matcher};
use crate::value::Value;

/// A policy over an observed call count.
///
/// # Example
///
/// ```rust
/// use testkit_mock::Quantifier;
///
/// assert!(Quantifier::exactly(2).accepts(2));
/// assert!(Quantifier::at_least(2).accepts(5));
/// assert!(!Quantifier::at_most(2).accepts(3));
/// assert!(Quantifier::between(1, 3).unwrap().accepts(3));
/// assert!(Quantifier::satisfying(|n| n % 2 == 0, "is even").accepts(4));
/// ```
#[derive(Clone, Debug)]
pub enum Quantifier {
    /// Exactly this many calls.
    Exactly(usize),
    /// A count accepted by a matcher, applied to the count as an int value.
    Predicate(ArgMatcher),
    /// At least this many calls.
    AtLeast(usize),
    /// At most this many calls.
    AtMost(usize),
    /// Between `min` and `max` calls, inclusive. `min < max`.
    Between(usize, usize),
}

impl Quantifier {
    /// Exactly `n` calls.
    #[must_use]
    pub fn exactly(n: usize) -> Self {
        Self::Exactly(n)
    }

    /// No calls at all.
    #[must_use]
    pub fn never() -> Self {
        Self::Exactly(0)
    }

    /// At least `n` calls.
    #[must_use]
    pub fn at_least(n: usize) -> Self {
        Self::AtLeast(n)
    }

    /// At most `n` calls.
    #[must_use]
    pub fn at_most(n: usize) -> Self {
        Self::AtMost(n)
    }

    /// Between `min` and `max` calls, inclusive.
    ///
    /// # Errors
    ///
    /// [`UsageError::InvalidQuantifier`] unless `min < max`.
    pub fn between(min: usize, max: usize) -> Result<Self> {
        if min < max {
            Ok(Self::Between(min, max))
        } else {
            Err(UsageError::invalid_quantifier(
                "between",
                format!("must be an ascending pair, got [{min}, {max}]"),
            ))
        }
    }

    /// A count accepted by `predicate`.
    #[must_use]
    pub fn satisfying<F>(predicate: F, description: &str) -> Self
    where
        F: Fn(usize) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(ArgMatcher::new(CountPredicate {
            predicate,
            description: description.to_string(),
        }))
    }

    /// Evaluate the policy against an observed count.
    #[must_use]
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == *n,
            Self::Predicate(matcher) => matcher.matches(&Value::from(count)),
            Self::AtLeast(n) => count >= *n,
            Self::AtMost(n) => count <= *n,
            Self::Between(min, max) => (*min..=*max).contains(&count),
        }
    }
}

impl Default for Quantifier {
    fn default() -> Self {
        Self::Exactly(1)
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {n} time(s)"),
            Self::Predicate(matcher) => write!(f, "a number of times that {}", matcher.describe()),
            Self::AtLeast(n) => write!(f, "at least {n} time(s)"),
            Self::AtMost(n) => write!(f, "at most {n} time(s)"),
            Self::Between(min, max) => write!(f, "between {min} and {max} time(s)"),
        }
    }
}

struct CountPredicate<F> {
    predicate: F,
    description: String,
}

impl<F: Fn(usize) -> bool> Matcher<Value> for CountPredicate<F> {
    fn matches(&self, value: &Value) -> bool {
        value
            .as_int()
            .and_then(|i| usize::try_from(i).ok())
            .is_some_and(|count| (self.predicate)(count))
    }

    fn describe(&self) -> String {
        self.description.clone()
    }

    fn describe_mismatch(&self, value: &Value) -> String {
        format!("{value} does not satisfy: {}", self.description)
    }
}

/// Quantifier options for a verification, validated as a whole.
///
/// Exactly one option must be set. Values are checked when the options are
/// turned into a [`Quantifier`]:
///
/// - `times`: a non-negative int, or a matcher value applied to the count
/// - `at_least`, `at_most`: a non-negative int
/// - `between`: a list of two non-negative ints in ascending order
///
/// # Example
///
/// ```rust
/// use testkit_mock::{matcher::gt, UsageError, VerifyOptions};
///
/// let q = VerifyOptions::new().between(vec![1, 3]).quantifier().unwrap();
/// assert!(q.accepts(2));
///
/// let q = VerifyOptions::new().times(gt(2)).quantifier().unwrap();
/// assert!(q.accepts(3));
///
/// let err = VerifyOptions::new().times(1).at_least(1).quantifier().unwrap_err();
/// assert_eq!(err, UsageError::QuantifierCount { given: 2 });
/// ```
#[derive(Clone, Debug, Default)]
pub struct VerifyOptions {
    times: Option<Value>,
    at_least: Option<Value>,
    at_most: Option<Value>,
    between: Option<Value>,
}

impl VerifyOptions {
    /// Create empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect an exact count, or a count accepted by a matcher.
    #[must_use]
    pub fn times(mut self, times: impl Into<Value>) -> Self {
        self.times = Some(times.into());
        self
    }

    /// Expect a minimum count.
    #[must_use]
    pub fn at_least(mut self, n: impl Into<Value>) -> Self {
        self.at_least = Some(n.into());
        self
    }

    /// Expect a maximum count.
    #[must_use]
    pub fn at_most(mut self, n: impl Into<Value>) -> Self {
        self.at_most = Some(n.into());
        self
    }

    /// Expect a count within an inclusive `[min, max]` pair.
    #[must_use]
    pub fn between(mut self, range: impl Into<Value>) -> Self {
        self.between = Some(range.into());
        self
    }

    /// Validate the options and build the quantifier.
    ///
    /// # Errors
    ///
    /// [`UsageError::QuantifierCount`] unless exactly one option is set,
    /// [`UsageError::InvalidQuantifier`] if its value has the wrong shape.
    pub fn quantifier(&self) -> Result<Quantifier> {
        let given = [&self.times, &self.at_least, &self.at_most, &self.between]
            .iter()
            .filter(|option| option.is_some())
            .count();
        if given != 1 {
            return Err(UsageError::QuantifierCount { given });
        }

        if let Some(times) = &self.times {
            return match times {
                Value::Matcher(matcher) => Ok(Quantifier::Predicate(matcher.clone())),
                other => count_option("times", other).map(Quantifier::Exactly),
            };
        }
        if let Some(n) = &self.at_least {
            return count_option("at_least", n).map(Quantifier::AtLeast);
        }
        if let Some(n) = &self.at_most {
            return count_option("at_most", n).map(Quantifier::AtMost);
        }
        match &self.between {
            Some(Value::List(pair)) if pair.len() == 2 => {
                let min = count_option("between", &pair[0])?;
                let max = count_option("between", &pair[1])?;
                Quantifier::between(min, max)
            }
            Some(other) => Err(UsageError::invalid_quantifier(
                "between",
                format!("must be a pair of counts, got {other}"),
            )),
            None => Err(UsageError::QuantifierCount { given: 0 }),
        }
    }
}

fn count_option(option: &'static str, value: &Value) -> Result<usize> {
    match value {
        Value::Int(i) => usize::try_from(*i).map_err(|_| {
            UsageError::invalid_quantifier(option, format!("must not be negative, got {i}"))
        }),
        other => Err(UsageError::invalid_quantifier(
            option,
            format!("must be an integer, got {}", other.kind()),
        )),
    }
}
