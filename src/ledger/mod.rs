//! Per-mock call history.
//!
//! The [`CallLedger`] records every operation invoked on a mock, in order,
//! stubbed or not. Entries are never removed or changed.

use std::fmt;

use crate::matcher::args_match;
use crate::value::{write_joined, Value};

/// A single recorded operation call.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Position of this call in the owning mock's history, starting at 1.
    pub sequence: u64,
    /// Name of the operation that was invoked.
    pub operation: String,
    /// The arguments it was invoked with.
    pub args: Vec<Value>,
}

impl Invocation {
    /// Check whether this call matches an operation and expected arguments.
    #[must_use]
    pub fn matches(&self, operation: &str, expected: &[Value]) -> bool {
        self.operation == operation && args_match(expected, &self.args)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", CallPattern::new(&self.operation, &self.args))
    }
}

/// Displays as `operation(arg, arg)`.
pub(crate) struct CallPattern<'a> {
    operation: &'a str,
    args: &'a [Value],
}

impl<'a> CallPattern<'a> {
    pub(crate) fn new(operation: &'a str, args: &'a [Value]) -> Self {
        Self { operation, args }
    }
}

impl fmt::Display for CallPattern<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operation)?;
        write_joined(f, self.args)?;
        f.write_str(")")
    }
}

/// Append-only, ordered record of invocations.
#[derive(Debug)]
pub struct CallLedger {
    entries: Vec<Invocation>,
    next_sequence: u64,
}

impl CallLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_sequence: 1,
        }
    }

    /// Record an invocation, assigning it the next sequence number.
    pub fn record(&mut self, operation: &str, args: Vec<Value>) -> &Invocation {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push(Invocation {
            sequence,
            operation: operation.to_string(),
            args,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// All invocations, in call order.
    #[must_use]
    pub fn entries(&self) -> &[Invocation] {
        &self.entries
    }

    /// Invocations matching an operation and expected arguments, in call order.
    pub fn matching<'a>(
        &'a self,
        operation: &'a str,
        expected: &'a [Value],
    ) -> impl Iterator<Item = &'a Invocation> + 'a {
        self.entries
            .iter()
            .filter(move |invocation| invocation.matches(operation, expected))
    }

    /// Count invocations matching an operation and expected arguments.
    #[must_use]
    pub fn count_matching(&self, operation: &str, expected: &[Value]) -> usize {
        self.matching(operation, expected).count()
    }

    /// Number of recorded invocations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CallLedger {
    fn default() -> Self {
        Self::new()
    }
}
