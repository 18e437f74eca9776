//! Where verification results go.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use super::VerificationResult;

/// Receives every verification result.
///
/// Implement this to turn results into test-runner output. Closures taking
/// `&VerificationResult` implement it too.
pub trait Reporter: Send + Sync {
    /// Handle one result.
    fn report(&self, result: &VerificationResult);
}

impl<F> Reporter for F
where
    F: Fn(&VerificationResult) + Send + Sync,
{
    fn report(&self, result: &VerificationResult) {
        self(result);
    }
}

/// Emits each result as a `tracing` event. The default reporter.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, result: &VerificationResult) {
        if result.passed {
            info!(passed = true, count = result.count, "{}", result.description);
        } else {
            warn!(passed = false, count = result.count, "{}", result.description);
        }
    }
}

/// Stores every result it receives.
///
/// Clones share the stored results, so one handle can be given to
/// verifications and another kept for inspection.
///
/// # Example
///
/// ```rust
/// use testkit_mock::{args, CollectingReporter, Mock};
///
/// let mock = Mock::new();
/// let reporter = CollectingReporter::new();
///
/// mock.call("ping", args![]).unwrap();
/// mock.verify().reporter(reporter.clone()).call("ping", args![]);
/// mock.verify().reporter(reporter.clone()).call("pong", args![]);
///
/// assert_eq!(reporter.len(), 2);
/// assert_eq!(reporter.failures().len(), 1);
/// assert!(!reporter.all_passed());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CollectingReporter {
    results: Arc<Mutex<Vec<VerificationResult>>>,
}

impl CollectingReporter {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All results, in the order they were reported.
    #[must_use]
    pub fn results(&self) -> Vec<VerificationResult> {
        self.results.lock().clone()
    }

    /// Results that did not pass.
    #[must_use]
    pub fn failures(&self) -> Vec<VerificationResult> {
        self.results
            .lock()
            .iter()
            .filter(|r| !r.passed)
            .cloned()
            .collect()
    }

    /// Check if every reported result passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.lock().iter().all(|r| r.passed)
    }

    /// Number of reported results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.lock().len()
    }

    /// Check if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.lock().is_empty()
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, result: &VerificationResult) {
        self.results.lock().push(result.clone());
    }
}
