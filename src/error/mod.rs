//! Error definitions
//!
//! Two disjoint families live here:
//!
//! - [`UsageError`] - the API was called incorrectly. Raised before any
//!   ledger or stub table is touched.
//! - [`StubbedFailure`] - a stub was configured to fail. This is ordinary
//!   control flow for the code under test, not a defect.

use thiserror::Error;

use crate::value::Value;

/// Misuse of the mocking API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// No mock was supplied to an entry point that needs one.
    #[error("{entry}() must be given a mock object")]
    MissingMock {
        /// Entry point that was called.
        entry: &'static str,
    },

    /// Something other than a mock was supplied.
    #[error("{entry}() must be given a mock object, got {found}")]
    NotAMock {
        /// Entry point that was called.
        entry: &'static str,
        /// Kind of the value that was supplied instead.
        found: &'static str,
    },

    /// The class name given to `create_mock` was not a string.
    #[error("class name must be a string, got {found}")]
    InvalidClassName {
        /// Kind of the value that was supplied instead.
        found: &'static str,
    },

    /// Zero or several quantifier options were supplied.
    #[error("exactly one of times, at_least, at_most or between must be given (got {given})")]
    QuantifierCount {
        /// How many quantifier options were set.
        given: usize,
    },

    /// A quantifier option had the wrong shape.
    #[error("invalid `{option}` option: {reason}")]
    InvalidQuantifier {
        /// Name of the offending option.
        option: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

impl UsageError {
    /// Create a missing-mock error for the named entry point.
    #[must_use]
    pub fn missing_mock(entry: &'static str) -> Self {
        Self::MissingMock { entry }
    }

    /// Create an invalid-quantifier error.
    #[must_use]
    pub fn invalid_quantifier(option: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidQuantifier {
            option,
            reason: reason.into(),
        }
    }
}

/// The failure a stub was told to raise.
///
/// Returned as the `Err` side of [`Mock::call`](crate::Mock::call) when the
/// resolved response is a raise, carrying the configured error value as is.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("`{operation}` raised {error}")]
pub struct StubbedFailure {
    /// Operation whose stub raised.
    pub operation: String,
    /// The configured error value.
    pub error: Value,
}

impl StubbedFailure {
    /// Take the configured error value.
    #[must_use]
    pub fn into_error(self) -> Value {
        self.error
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, UsageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_messages() {
        assert_eq!(
            UsageError::missing_mock("stub").to_string(),
            "stub() must be given a mock object"
        );
        assert_eq!(
            UsageError::QuantifierCount { given: 2 }.to_string(),
            "exactly one of times, at_least, at_most or between must be given (got 2)"
        );
        assert_eq!(
            UsageError::invalid_quantifier("between", "must be ascending").to_string(),
            "invalid `between` option: must be ascending"
        );
    }

    #[test]
    fn test_stubbed_failure_message() {
        let failure = StubbedFailure {
            operation: "fetch".to_string(),
            error: Value::from("boom"),
        };
        assert_eq!(failure.to_string(), "`fetch` raised \"boom\"");
        assert_eq!(failure.into_error(), Value::from("boom"));
    }
}
