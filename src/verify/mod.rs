//! Call verification.
//!
//! A verification counts the recorded calls matching an operation and an
//! expected argument list, then checks the count against a [`Quantifier`].
//! A failed verification is a normal [`VerificationResult`] with `passed`
//! set to false, never an error.
//!
//! # Example
//!
//! ```rust
//! use testkit_mock::{args, matcher::anything, Mock, Quantifier};
//!
//! let mock = Mock::new();
//! mock.call("send", args!["hello"]).unwrap();
//! mock.call("send", args!["world"]).unwrap();
//!
//! let result = mock
//!     .verify_that(Quantifier::exactly(2))
//!     .call("send", args![anything()]);
//! assert!(result.passed);
//! assert_eq!(result.description, "send(anything) was called exactly 2 time(s) (observed 2)");
//!
//! let result = mock.verify().call("send", args!["hello"]);
//! result.assert();
//! ```

mod quantifier;
mod report;

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::ledger::CallPattern;
use crate::mock::Mock;
use crate::value::Value;

pub use quantifier::{Quantifier, VerifyOptions};
pub use report::{CollectingReporter, Reporter, TracingReporter};

/// Outcome of one verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationResult {
    /// Whether the observed count satisfied the quantifier.
    pub passed: bool,
    /// Human-readable description, or the caller's label.
    pub description: String,
    /// Number of matching calls observed.
    pub count: usize,
}

impl VerificationResult {
    /// Panic unless the verification passed.
    ///
    /// # Panics
    ///
    /// Panics with the description when `passed` is false.
    #[track_caller]
    pub fn assert(&self) {
        assert!(self.passed, "verification failed: {}", self.description);
    }
}

impl fmt::Display for VerificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Count the calls of `operation` on `mock` matching `expected_args` and
/// evaluate `quantifier` against the count.
///
/// A `label` replaces the generated description.
#[must_use]
pub fn verify(
    mock: &Mock,
    operation: &str,
    expected_args: &[Value],
    quantifier: &Quantifier,
    label: Option<&str>,
) -> VerificationResult {
    let count = mock.count_calls(operation, expected_args);
    let passed = quantifier.accepts(count);
    let description = match label {
        Some(label) => label.to_string(),
        None => format!(
            "{} was called {quantifier} (observed {count})",
            CallPattern::new(operation, expected_args)
        ),
    };
    debug!(mock = %mock, operation, count, passed, "verified calls");
    VerificationResult {
        passed,
        description,
        count,
    }
}

/// A pending verification, performed when an operation is named with
/// [`call`](Self::call).
///
/// Obtained from [`Mock::verify`], [`Mock::verify_that`] or
/// [`begin_verify`](crate::begin_verify).
pub struct VerifyBuilder {
    mock: Mock,
    quantifier: Quantifier,
    label: Option<String>,
    reporter: Arc<dyn Reporter>,
}

impl VerifyBuilder {
    pub(crate) fn new(mock: Mock, quantifier: Quantifier) -> Self {
        Self {
            mock,
            quantifier,
            label: None,
            reporter: Arc::new(TracingReporter),
        }
    }

    /// Replace the generated description with `label`.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Send results to `reporter` instead of the default [`TracingReporter`].
    #[must_use]
    pub fn reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    /// The quantifier this verification will apply.
    #[must_use]
    pub fn quantifier(&self) -> &Quantifier {
        &self.quantifier
    }

    /// Verify calls of `operation` matching `args`, report the result and
    /// return it.
    ///
    /// The builder is not consumed, so one builder can check several
    /// operations against the same quantifier.
    pub fn call(&self, operation: &str, args: Vec<Value>) -> VerificationResult {
        let result = verify(
            &self.mock,
            operation,
            &args,
            &self.quantifier,
            self.label.as_deref(),
        );
        self.reporter.report(&result);
        result
    }
}

impl fmt::Debug for VerifyBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyBuilder")
            .field("mock", &self.mock)
            .field("quantifier", &self.quantifier)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
