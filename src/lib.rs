//! # testkit-mock 🧰
//!
//! > Mocks, stubs and call verification for Rust tests
//!
//! **testkit-mock** provides test doubles that accept any operation, answer
//! with canned responses, and remember every call for later verification.
//!
//! ## Quick Start
//!
//! ```rust
//! use testkit_mock::prelude::*;
//!
//! let mailer = Mock::with_class("Mailer");
//! mailer.stub().call("send", args!["alice", anything()]).returns(true);
//! mailer.stub().call("send", args!["mallory", anything()]).raises("blocked");
//!
//! // Code under test
//! assert_eq!(mailer.call("send", args!["alice", "hi"]).unwrap().scalar(), Value::Bool(true));
//! assert!(mailer.call("send", args!["mallory", "hi"]).is_err());
//!
//! mailer
//!     .verify_that(Quantifier::exactly(2))
//!     .call("send", args![anything(), "hi"])
//!     .assert();
//! ```
//!
//! ## Typed mocks
//!
//! With the `macros` feature (on by default), `#[mockable]` implements a
//! trait for [`Mock`] by forwarding every method to [`Mock::call`]:
//!
//! ```rust
//! # #[cfg(feature = "macros")]
//! # {
//! use testkit_mock::{args, mockable, Mock};
//!
//! #[mockable]
//! trait Clock {
//!     fn now(&self) -> i64;
//! }
//!
//! let clock = Mock::new();
//! clock.stub().call("now", args![]).returns(1_700_000_000);
//! assert_eq!(Clock::now(&clock), 1_700_000_000);
//! # }
//! ```
//!
//! ## Features
//!
//! - 🎭 **Mocks** - Accept any operation, record every call
//! - 🥫 **Stubs** - Canned return values, raised errors, or callbacks
//! - 🔍 **Verification** - Exact, at-least, at-most, range or predicate counts
//! - 🎯 **Matchers** - Wildcards and predicates in argument positions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod error;
pub mod ledger;
pub mod matcher;
pub mod mock;
pub mod stub;
pub mod value;
pub mod verify;

/// Prelude for convenient imports
///
/// ```rust
/// use testkit_mock::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{begin_stub, begin_verify, create_mock, inspect};
    pub use crate::error::{StubbedFailure, UsageError};
    pub use crate::matcher::{anything, satisfies, Matcher};
    pub use crate::mock::{Mock, Returned};
    pub use crate::value::Value;
    pub use crate::verify::{Quantifier, VerificationResult, VerifyOptions};
    pub use crate::{args, assert_that};
}

// Re-exports
pub use api::{begin_stub, begin_verify, create_mock, inspect};
pub use error::{Result, StubbedFailure, UsageError};
pub use ledger::{CallLedger, Invocation};
pub use mock::{FromOutcome, Mock, MockRef, Outcome, Returned};
pub use stub::{Response, ResponseSetter, StubBuilder, StubTable};
pub use value::{FromValue, Value};
pub use verify::{
    verify, CollectingReporter, Quantifier, Reporter, TracingReporter, VerificationResult,
    VerifyBuilder, VerifyOptions,
};

// Re-export the proxy macro when macros feature is enabled
#[cfg(feature = "macros")]
pub use testkit_mock_macros::mockable;
