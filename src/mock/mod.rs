//! Mock objects and the call interception point.
//!
//! A [`Mock`] accepts any operation through [`Mock::call`]. Every call is
//! recorded in the mock's call ledger before a response is resolved from its
//! stub table, so verification sees stubbed and unstubbed calls alike.
//!
//! # Example
//!
//! ```rust
//! use testkit_mock::{args, Mock, Value};
//!
//! let mock = Mock::with_class("Repository");
//!
//! // Unstubbed operations return nothing and never fail.
//! assert!(mock.call("load", args![1]).unwrap().is_empty());
//!
//! mock.stub().call("load", args![1]).returns("alice");
//! assert_eq!(mock.call("load", args![1]).unwrap().scalar(), Value::from("alice"));
//!
//! assert_eq!(mock.invocations().len(), 2);
//! ```

mod outcome;

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::{StubbedFailure, UsageError};
use crate::ledger::{CallLedger, Invocation};
use crate::matcher::args_match;
use crate::stub::{Response, StubBuilder, StubTable};
use crate::value::Value;
use crate::verify::{Quantifier, VerifyBuilder};

pub use outcome::{FromOutcome, Outcome, Returned};

/// A test double that records every call made on it.
///
/// Cloning a `Mock` yields another handle to the same mock: clones share the
/// call history and the stubs.
///
/// The mock is freed when its last handle drops. A mock that holds a handle to
/// itself keeps itself alive: a stub returning the mock (the usual fluent
/// builder fake) until [`clear_stubs`](Self::clear_stubs) is called, and a
/// call that passed the mock as an argument for as long as the process runs,
/// since the call history is never cleared.
#[derive(Clone)]
pub struct Mock {
    inner: Arc<MockInner>,
}

struct MockInner {
    class_name: Option<String>,
    ledger: Mutex<CallLedger>,
    stubs: Mutex<StubTable>,
}

impl Mock {
    /// Create a mock with no class name.
    #[must_use]
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create a mock that describes itself as an instance of `class_name`.
    ///
    /// The name is descriptive only and plays no part in matching.
    #[must_use]
    pub fn with_class(class_name: impl Into<String>) -> Self {
        Self::build(Some(class_name.into()))
    }

    fn build(class_name: Option<String>) -> Self {
        Self {
            inner: Arc::new(MockInner {
                class_name,
                ledger: Mutex::new(CallLedger::new()),
                stubs: Mutex::new(StubTable::new()),
            }),
        }
    }

    /// The declared class name, if any.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.inner.class_name.as_deref()
    }

    /// Check whether two handles refer to the same mock.
    #[must_use]
    pub fn same_as(&self, other: &Mock) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Invoke `operation` on the mock.
    ///
    /// The call is recorded first, then answered by the most recent matching
    /// stub. Without a matching stub the call returns nothing.
    ///
    /// # Errors
    ///
    /// Returns the [`StubbedFailure`] configured with
    /// [`ResponseSetter::raises`](crate::ResponseSetter::raises), or the error
    /// value produced by an `executes` callback.
    pub fn call(&self, operation: &str, args: Vec<Value>) -> Outcome {
        let invocation = self.inner.ledger.lock().record(operation, args).clone();
        let Invocation { sequence, args, .. } = invocation;
        trace!(mock = %self, operation, sequence, "recorded invocation");

        // Matchers and callbacks run with both locks released.
        let candidates = self.inner.stubs.lock().candidates(operation);
        let winner = candidates
            .into_iter()
            .find(|(_, expected)| args_match(expected, &args))
            .map(|(id, _)| id);
        let response = winner.and_then(|id| self.inner.stubs.lock().next_response(id));
        let Some(response) = response else {
            trace!(mock = %self, operation, "no stub matched");
            return Ok(Returned::default());
        };
        debug!(mock = %self, operation, sequence, ?response, "resolved stub");

        let failure = |error| StubbedFailure {
            operation: operation.to_string(),
            error,
        };
        match response {
            Response::Return(values) => Ok(Returned::new(values)),
            Response::Raise(error) => Err(failure(error)),
            Response::Execute(callback) => callback(&args).map(Returned::new).map_err(failure),
        }
    }

    /// Start registering stubs on this mock.
    #[must_use]
    pub fn stub(&self) -> StubBuilder {
        StubBuilder::new(self.clone())
    }

    /// Start a verification expecting exactly one matching call.
    #[must_use]
    pub fn verify(&self) -> VerifyBuilder {
        VerifyBuilder::new(self.clone(), Quantifier::default())
    }

    /// Start a verification with the given quantifier.
    #[must_use]
    pub fn verify_that(&self, quantifier: Quantifier) -> VerifyBuilder {
        VerifyBuilder::new(self.clone(), quantifier)
    }

    /// Every recorded call, in call order.
    #[must_use]
    pub fn invocations(&self) -> Vec<Invocation> {
        self.inner.ledger.lock().entries().to_vec()
    }

    /// Recorded calls of `operation` whose arguments match `args`, in call
    /// order.
    ///
    /// ```rust
    /// use testkit_mock::{args, matcher::anything, Mock, Value};
    ///
    /// let mock = Mock::new();
    /// mock.call("save", args![1, "a"]).unwrap();
    /// mock.call("load", args![1]).unwrap();
    /// mock.call("save", args![2, "b"]).unwrap();
    ///
    /// let saves = mock.invocations_of("save", &args![anything(), anything()]);
    /// assert_eq!(saves.len(), 2);
    /// assert_eq!(saves[1].args[1], Value::from("b"));
    /// ```
    #[must_use]
    pub fn invocations_of(&self, operation: &str, args: &[Value]) -> Vec<Invocation> {
        self.invocations()
            .into_iter()
            .filter(|invocation| invocation.matches(operation, args))
            .collect()
    }

    /// Count recorded calls of `operation` whose arguments match `args`.
    #[must_use]
    pub fn count_calls(&self, operation: &str, args: &[Value]) -> usize {
        self.invocations()
            .iter()
            .filter(|invocation| invocation.matches(operation, args))
            .count()
    }

    /// Total number of recorded calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.inner.ledger.lock().len()
    }

    /// Drop every stub registered on this mock.
    ///
    /// Later calls return nothing until new stubs are registered, and
    /// [`ResponseSetter`](crate::ResponseSetter)s obtained earlier stop having
    /// any effect. The call history is kept.
    ///
    /// ```rust
    /// use testkit_mock::{args, Mock};
    ///
    /// let builder = Mock::with_class("QueryBuilder");
    /// builder.stub().call("filter", args![]).returns(&builder);
    /// assert!(builder.call("filter", args![]).unwrap().scalar().as_mock().is_some());
    ///
    /// builder.clear_stubs();
    /// assert!(builder.call("filter", args![]).unwrap().is_empty());
    /// ```
    pub fn clear_stubs(&self) {
        let removed = self.inner.stubs.lock().clear();
        debug!(mock = %self, removed = removed.len(), "cleared stubs");
        drop(removed);
    }

    pub(crate) fn with_stubs<R>(&self, f: impl FnOnce(&mut StubTable) -> R) -> R {
        f(&mut self.inner.stubs.lock())
    }
}

impl Default for Mock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Mock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class_name() {
            Some(name) => write!(f, "Mock({name})"),
            None => f.write_str("Mock"),
        }
    }
}

impl fmt::Debug for Mock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mock")
            .field("class_name", &self.inner.class_name)
            .field("call_count", &self.call_count())
            .field("stubs", &self.inner.stubs.lock().len())
            .finish()
    }
}

/// Anything that may hold a mock.
///
/// The entry points in [`api`](crate::api) accept any `MockRef` and report a
/// [`UsageError`] when it does not hold one.
pub trait MockRef {
    /// Get the mock, or explain why there is none. `entry` names the calling
    /// entry point for the error message.
    ///
    /// # Errors
    ///
    /// [`UsageError::MissingMock`] when absent, [`UsageError::NotAMock`] when
    /// something else was supplied.
    fn resolve_mock(&self, entry: &'static str) -> Result<&Mock, UsageError>;
}

impl MockRef for Mock {
    fn resolve_mock(&self, _entry: &'static str) -> Result<&Mock, UsageError> {
        Ok(self)
    }
}

impl MockRef for Value {
    fn resolve_mock(&self, entry: &'static str) -> Result<&Mock, UsageError> {
        match self {
            Value::Mock(mock) => Ok(mock),
            Value::Undef => Err(UsageError::missing_mock(entry)),
            other => Err(UsageError::NotAMock {
                entry,
                found: other.kind(),
            }),
        }
    }
}

impl<T: MockRef> MockRef for Option<T> {
    fn resolve_mock(&self, entry: &'static str) -> Result<&Mock, UsageError> {
        match self {
            Some(inner) => inner.resolve_mock(entry),
            None => Err(UsageError::missing_mock(entry)),
        }
    }
}

impl<T: MockRef + ?Sized> MockRef for &T {
    fn resolve_mock(&self, entry: &'static str) -> Result<&Mock, UsageError> {
        (**self).resolve_mock(entry)
    }
}
