//! Checked entry points.
//!
//! These functions accept anything that may hold a mock (see [`MockRef`]) and
//! report misuse as a [`UsageError`] before touching any mock state. Code
//! holding a [`Mock`] directly can use [`Mock::stub`], [`Mock::verify`] and
//! [`Mock::invocations`] instead.
//!
//! # Example
//!
//! ```rust
//! use testkit_mock::{args, begin_stub, begin_verify, create_mock, inspect, Value, VerifyOptions};
//!
//! let mock = create_mock(Some(&Value::from("Mailer"))).unwrap();
//! begin_stub(&mock).unwrap().call("send", args!["hi"]).returns(true);
//!
//! assert_eq!(mock.call("send", args!["hi"]).unwrap().scalar(), Value::Bool(true));
//! assert_eq!(inspect(&mock).unwrap().len(), 1);
//!
//! let verify = begin_verify(&mock, Some(VerifyOptions::new().at_least(1)), None).unwrap();
//! assert!(verify.call("send", args!["hi"]).passed);
//!
//! assert!(begin_stub(&Value::Int(3)).is_err());
//! ```

use crate::error::{Result, UsageError};
use crate::ledger::Invocation;
use crate::mock::{Mock, MockRef};
use crate::stub::StubBuilder;
use crate::value::Value;
use crate::verify::{Quantifier, VerifyBuilder, VerifyOptions};

/// Create a mock, optionally with a descriptive class name.
///
/// # Errors
///
/// [`UsageError::InvalidClassName`] when the class name is not a string.
pub fn create_mock(class_name: Option<&Value>) -> Result<Mock> {
    match class_name {
        None => Ok(Mock::new()),
        Some(Value::Str(name)) => Ok(Mock::with_class(name.clone())),
        Some(other) => Err(UsageError::InvalidClassName {
            found: other.kind(),
        }),
    }
}

/// Start registering stubs on a mock.
///
/// # Errors
///
/// [`UsageError::MissingMock`] or [`UsageError::NotAMock`] when `target`
/// does not hold a mock.
pub fn begin_stub(target: &impl MockRef) -> Result<StubBuilder> {
    Ok(target.resolve_mock("stub")?.stub())
}

/// Start a verification.
///
/// Without options the verification expects exactly one matching call.
/// With options, exactly one quantifier must be set (see [`VerifyOptions`]).
/// A `label` replaces the generated description of the result.
///
/// # Errors
///
/// [`UsageError::MissingMock`] or [`UsageError::NotAMock`] when `target`
/// does not hold a mock, [`UsageError::QuantifierCount`] or
/// [`UsageError::InvalidQuantifier`] for bad options.
pub fn begin_verify(
    target: &impl MockRef,
    options: Option<VerifyOptions>,
    label: Option<&str>,
) -> Result<VerifyBuilder> {
    let mock = target.resolve_mock("verify")?;
    let quantifier = match options {
        Some(options) => options.quantifier()?,
        None => Quantifier::default(),
    };
    let builder = mock.verify_that(quantifier);
    Ok(match label {
        Some(label) => builder.label(label),
        None => builder,
    })
}

/// Every call recorded on a mock, in call order.
///
/// # Errors
///
/// [`UsageError::MissingMock`] or [`UsageError::NotAMock`] when `target`
/// does not hold a mock.
pub fn inspect(target: &impl MockRef) -> Result<Vec<Invocation>> {
    Ok(target.resolve_mock("inspect")?.invocations())
}
