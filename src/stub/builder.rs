//! Fluent stub registration.

use std::sync::Arc;

use tracing::debug;

use super::{Response, StubId};
use crate::mock::Mock;
use crate::value::Value;

/// Starts stub registrations on a mock.
///
/// Obtained from [`Mock::stub`] or [`begin_stub`](crate::begin_stub).
///
/// # Example
///
/// ```rust
/// use testkit_mock::{args, Mock, Value};
///
/// let mock = Mock::new();
/// mock.stub().call("next", args![]).returns(1).returns(2);
///
/// assert_eq!(mock.call("next", args![]).unwrap().scalar(), Value::Int(1));
/// assert_eq!(mock.call("next", args![]).unwrap().scalar(), Value::Int(2));
/// assert_eq!(mock.call("next", args![]).unwrap().scalar(), Value::Int(2));
/// ```
#[derive(Clone, Debug)]
pub struct StubBuilder {
    mock: Mock,
}

impl StubBuilder {
    pub(crate) fn new(mock: Mock) -> Self {
        Self { mock }
    }

    /// Register a new stub for `operation` called with `args`.
    ///
    /// The new registration takes precedence over every earlier one that
    /// matches the same calls.
    #[must_use]
    pub fn call(&self, operation: &str, args: Vec<Value>) -> ResponseSetter {
        let id = self
            .mock
            .with_stubs(|stubs| stubs.register(operation, args));
        debug!(mock = %self.mock, operation, "registered stub");
        ResponseSetter {
            mock: self.mock.clone(),
            id,
        }
    }

    /// Add responses to the latest stub registered with exactly this
    /// operation and argument list, registering one if there is none.
    ///
    /// ```rust
    /// use testkit_mock::{args, Mock, Value};
    ///
    /// let mock = Mock::new();
    /// mock.stub().extend("next", args![]).returns(1);
    /// mock.stub().extend("next", args![]).returns(2);
    ///
    /// assert_eq!(mock.call("next", args![]).unwrap().scalar(), Value::Int(1));
    /// assert_eq!(mock.call("next", args![]).unwrap().scalar(), Value::Int(2));
    /// ```
    #[must_use]
    pub fn extend(&self, operation: &str, args: Vec<Value>) -> ResponseSetter {
        let id = self
            .mock
            .with_stubs(|stubs| stubs.register_or_reuse(operation, args));
        debug!(mock = %self.mock, operation, "extending stub");
        ResponseSetter {
            mock: self.mock.clone(),
            id,
        }
    }
}

/// Appends responses to one stub registration.
///
/// Every method returns the setter so responses can be chained. Responses are
/// used in the order they were added; the last one repeats forever.
#[derive(Clone, Debug)]
pub struct ResponseSetter {
    mock: Mock,
    id: StubId,
}

impl ResponseSetter {
    fn push(self, response: Response) -> Self {
        self.mock
            .with_stubs(|stubs| stubs.push_response(self.id, response));
        self
    }

    /// Return a single value.
    pub fn returns(self, value: impl Into<Value>) -> Self {
        self.push(Response::Return(vec![value.into()]))
    }

    /// Return several values.
    ///
    /// ```rust
    /// use testkit_mock::{args, Mock, Value};
    ///
    /// let mock = Mock::new();
    /// mock.stub().call("pair", args![]).returns_all([1, 2]);
    ///
    /// let returned = mock.call("pair", args![]).unwrap();
    /// assert_eq!(returned.list(), &[Value::Int(1), Value::Int(2)]);
    /// assert_eq!(returned.scalar(), Value::Int(1));
    /// ```
    pub fn returns_all<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push(Response::Return(values.into_iter().map(Into::into).collect()))
    }

    /// Return nothing.
    pub fn returns_nothing(self) -> Self {
        self.push(Response::nothing())
    }

    /// Fail with an error value.
    ///
    /// ```rust
    /// use testkit_mock::{args, Mock, Value};
    ///
    /// let mock = Mock::new();
    /// mock.stub().call("open", args!["/etc"]).raises("permission denied");
    ///
    /// let failure = mock.call("open", args!["/etc"]).unwrap_err();
    /// assert_eq!(failure.error, Value::from("permission denied"));
    /// ```
    pub fn raises(self, error: impl Into<Value>) -> Self {
        self.push(Response::Raise(error.into()))
    }

    /// Compute the response from the actual arguments, on every call.
    ///
    /// ```rust
    /// use testkit_mock::{args, Mock, Value};
    ///
    /// let mock = Mock::new();
    /// mock.stub()
    ///     .call("double", args![testkit_mock::matcher::anything()])
    ///     .executes(|args| match args[0].as_int() {
    ///         Some(i) => Ok(vec![Value::Int(i * 2)]),
    ///         None => Err(Value::from("not a number")),
    ///     });
    ///
    /// assert_eq!(mock.call("double", args![21]).unwrap().scalar(), Value::Int(42));
    /// assert!(mock.call("double", args!["x"]).is_err());
    /// ```
    pub fn executes<F>(self, callback: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Vec<Value>, Value> + Send + Sync + 'static,
    {
        self.push(Response::Execute(Arc::new(callback)))
    }
}
