//! Canned responses.
//!
//! A [`StubTable`] holds the stub registrations of one mock. Each
//! registration pairs an operation and an expected argument list with a queue
//! of [`Response`]s. When a call comes in, the most recently registered
//! matching registration answers it: its queue is consumed front to back and
//! the last response then repeats.
//!
//! - [`StubBuilder`] - entry point for registering stubs on a mock
//! - [`ResponseSetter`] - chains responses onto one registration

mod builder;

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use crate::matcher::args_match;
use crate::value::Value;

pub use builder::{ResponseSetter, StubBuilder};

/// Callback computing a response from the actual arguments.
///
/// `Ok` values are returned to the caller, an `Err` value is raised.
pub type Callback = Arc<dyn Fn(&[Value]) -> Result<Vec<Value>, Value> + Send + Sync>;

/// What a stubbed call does.
#[derive(Clone)]
pub enum Response {
    /// Return these values.
    Return(Vec<Value>),
    /// Fail with this error value.
    Raise(Value),
    /// Run a callback with the call's arguments.
    Execute(Callback),
}

impl Response {
    /// The response used when no stub matches: return nothing.
    #[must_use]
    pub fn nothing() -> Self {
        Self::Return(Vec::new())
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Return(values) => f.debug_tuple("Return").field(values).finish(),
            Self::Raise(error) => f.debug_tuple("Raise").field(error).finish(),
            Self::Execute(_) => f.write_str("Execute(..)"),
        }
    }
}

/// Handle to a registration inside its mock's [`StubTable`].
///
/// A handle taken before [`StubTable::clear`] no longer refers to anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StubId {
    index: usize,
    generation: usize,
}

/// One stubbed operation and argument pattern with its response queue.
#[derive(Debug)]
pub struct StubRegistration {
    operation: String,
    expected_args: Vec<Value>,
    responses: VecDeque<Response>,
}

impl StubRegistration {
    fn new(operation: &str, expected_args: Vec<Value>) -> Self {
        Self {
            operation: operation.to_string(),
            expected_args,
            responses: VecDeque::new(),
        }
    }

    /// Operation this registration answers.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Expected argument pattern.
    #[must_use]
    pub fn expected_args(&self) -> &[Value] {
        &self.expected_args
    }

    /// Number of queued responses.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.responses.len()
    }

    fn has_key(&self, operation: &str, expected_args: &[Value]) -> bool {
        self.operation == operation && self.expected_args == expected_args
    }

    // Pop while more than one response remains; the last one repeats.
    fn take_response(&mut self) -> Option<Response> {
        if self.responses.len() > 1 {
            self.responses.pop_front()
        } else {
            self.responses.back().cloned()
        }
    }
}

/// All stub registrations of one mock, in registration order.
///
/// Registrations are only ever appended, or dropped all at once by
/// [`clear`](Self::clear).
#[derive(Debug, Default)]
pub struct StubTable {
    registrations: Vec<StubRegistration>,
    generation: usize,
}

impl StubTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn id(&self, index: usize) -> StubId {
        StubId {
            index,
            generation: self.generation,
        }
    }

    fn registration_mut(&mut self, id: StubId) -> Option<&mut StubRegistration> {
        if id.generation == self.generation {
            self.registrations.get_mut(id.index)
        } else {
            None
        }
    }

    /// Append a fresh registration.
    pub fn register(&mut self, operation: &str, expected_args: Vec<Value>) -> StubId {
        self.registrations
            .push(StubRegistration::new(operation, expected_args));
        self.id(self.registrations.len() - 1)
    }

    /// Reuse the most recent registration with exactly this key, or append
    /// a fresh one.
    ///
    /// Keys compare literally: matchers inside `expected_args` are equal only
    /// to themselves, they are not applied.
    pub fn register_or_reuse(&mut self, operation: &str, expected_args: Vec<Value>) -> StubId {
        match self
            .registrations
            .iter()
            .rposition(|r| r.has_key(operation, &expected_args))
        {
            Some(index) => self.id(index),
            None => self.register(operation, expected_args),
        }
    }

    /// Append a response to a registration's queue.
    pub fn push_response(&mut self, id: StubId, response: Response) {
        if let Some(registration) = self.registration_mut(id) {
            registration.responses.push_back(response);
        }
    }

    /// Look up a registration.
    #[must_use]
    pub fn get(&self, id: StubId) -> Option<&StubRegistration> {
        if id.generation == self.generation {
            self.registrations.get(id.index)
        } else {
            None
        }
    }

    /// The registrations for `operation` with their expected arguments,
    /// most recent first.
    ///
    /// Lets a caller run the matchers without holding on to the table; the
    /// winner is then consumed with [`next_response`](Self::next_response).
    #[must_use]
    pub fn candidates(&self, operation: &str) -> Vec<(StubId, Vec<Value>)> {
        self.registrations
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, r)| r.operation == operation)
            .map(|(index, r)| (self.id(index), r.expected_args.clone()))
            .collect()
    }

    /// Take the next response queued on a registration.
    ///
    /// Pops the front while more than one response remains, then repeats the
    /// last one. `None` when the queue is empty or the handle is stale.
    pub fn next_response(&mut self, id: StubId) -> Option<Response> {
        self.registration_mut(id)
            .and_then(StubRegistration::take_response)
    }

    /// Resolve the response for a call.
    ///
    /// The most recently registered registration whose pattern matches the
    /// call answers it. Returns `None` when no registration matches or the
    /// matching one has no responses queued.
    pub fn resolve(&mut self, operation: &str, args: &[Value]) -> Option<Response> {
        let id = self
            .candidates(operation)
            .into_iter()
            .find(|(_, expected)| args_match(expected, args))
            .map(|(id, _)| id)?;
        self.next_response(id)
    }

    /// Drop every registration and return them.
    ///
    /// Handles taken before the call go stale. Returning the registrations
    /// lets the caller drop them after releasing any lock on the table.
    pub fn clear(&mut self) -> Vec<StubRegistration> {
        self.generation += 1;
        std::mem::take(&mut self.registrations)
    }

    /// Number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Check if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
