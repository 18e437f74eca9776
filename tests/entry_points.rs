//! Integration tests for the checked entry points.

use testkit_mock::matcher::anything;
use testkit_mock::{
    args, begin_stub, begin_verify, create_mock, inspect, Mock, UsageError, Value, VerifyOptions,
};

/// A full stub, call, inspect and verify cycle through the entry points.
#[test]
fn test_round_trip_through_entry_points() {
    let payments = create_mock(Some(&Value::from("PaymentGateway"))).unwrap();
    assert_eq!(payments.to_string(), "Mock(PaymentGateway)");

    begin_stub(&payments)
        .unwrap()
        .call("charge", args![anything(), 100])
        .returns("ok")
        .returns("declined");

    let first = payments.call("charge", args!["card-1", 100]).unwrap();
    let second = payments.call("charge", args!["card-2", 100]).unwrap();
    assert_eq!(first.scalar(), Value::from("ok"));
    assert_eq!(second.scalar(), Value::from("declined"));

    let calls = inspect(&payments).unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].sequence, 1);
    assert_eq!(calls[1].sequence, 2);
    assert_eq!(calls[1].args, args!["card-2", 100]);
    assert_eq!(calls[0].to_string(), "charge(\"card-1\", 100)");

    let verify = begin_verify(
        &payments,
        Some(VerifyOptions::new().times(2)),
        Some("charged twice"),
    )
    .unwrap();
    let result = verify.call("charge", args![anything(), 100]);
    assert!(result.passed);
    assert_eq!(result.description, "charged twice");
}

/// Without options, a verification expects exactly one call.
#[test]
fn test_verify_defaults_to_once() {
    let cache = create_mock(None).unwrap();
    cache.call("evict", args!["k"]).unwrap();

    assert!(begin_verify(&cache, None, None)
        .unwrap()
        .call("evict", args!["k"])
        .passed);

    cache.call("evict", args!["k"]).unwrap();
    let result = begin_verify(&cache, None, None)
        .unwrap()
        .call("evict", args!["k"]);
    assert!(!result.passed);
    assert_eq!(result.count, 2);
}

/// Every entry point rejects targets that are not mocks.
#[test]
fn test_usage_errors() {
    let not_mocks = [
        (Value::Undef, None),
        (Value::Int(1), Some("int")),
        (Value::from("mock"), Some("string")),
        (Value::from(vec![1]), Some("list")),
    ];

    for (target, found) in not_mocks {
        let expected = |entry| match found {
            None => UsageError::MissingMock { entry },
            Some(found) => UsageError::NotAMock { entry, found },
        };
        assert_eq!(begin_stub(&target).unwrap_err(), expected("stub"));
        assert_eq!(
            begin_verify(&target, None, None).unwrap_err(),
            expected("verify")
        );
        assert_eq!(inspect(&target).unwrap_err(), expected("inspect"));
    }

    assert_eq!(
        create_mock(Some(&Value::Bool(true))).unwrap_err(),
        UsageError::InvalidClassName { found: "bool" }
    );
}

/// Usage errors render readable messages.
#[test]
fn test_usage_error_messages() {
    assert_eq!(
        begin_stub(&None::<Mock>).unwrap_err().to_string(),
        "stub() must be given a mock object"
    );
    assert_eq!(
        inspect(&Value::Int(3)).unwrap_err().to_string(),
        "inspect() must be given a mock object, got int"
    );
    assert_eq!(
        begin_verify(&Mock::new(), Some(VerifyOptions::new()), None)
            .unwrap_err()
            .to_string(),
        "exactly one of times, at_least, at_most or between must be given (got 0)"
    );
}

/// Mocks held in values and options resolve to the same mock.
#[test]
fn test_wrapped_mocks_share_state() {
    let mock = Mock::new();
    let as_value = Value::from(&mock);
    let as_option = Some(mock.clone());

    begin_stub(&as_value)
        .unwrap()
        .call("ping", args![])
        .returns("pong");
    assert_eq!(
        mock.call("ping", args![]).unwrap().scalar(),
        Value::from("pong")
    );
    assert_eq!(inspect(&as_option).unwrap().len(), 1);
    assert!(begin_verify(&&mock, None, None)
        .unwrap()
        .call("ping", args![])
        .passed);
}

/// Usage errors do not touch the mock.
#[test]
fn test_usage_errors_leave_state_untouched() {
    let mock = Mock::new();
    mock.call("f", args![]).unwrap();

    assert!(begin_verify(&mock, Some(VerifyOptions::new().at_least(-2)), None).is_err());
    assert!(begin_verify(
        &mock,
        Some(VerifyOptions::new().times(1).between(vec![0, 1])),
        None
    )
    .is_err());

    assert_eq!(inspect(&mock).unwrap().len(), 1);
}
