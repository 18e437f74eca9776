//! Integration tests for stub registration and resolution.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use testkit_mock::matcher::{anything, contains_str, gt, satisfies};
use testkit_mock::{args, Mock, Quantifier, Value};

/// Queued responses are consumed in order and the last one repeats.
#[test]
fn test_response_queue_repeats_last() {
    let dice = Mock::with_class("Dice");
    dice.stub()
        .call("roll", args![])
        .returns(4)
        .returns(2)
        .returns(6);

    let rolls: Vec<Value> = (0..5)
        .map(|_| dice.call("roll", args![]).unwrap().scalar())
        .collect();
    assert_eq!(rolls, args![4, 2, 6, 6, 6]);
}

/// A later stub for the same call replaces the earlier one.
#[test]
fn test_later_stub_overrides_earlier() {
    let config = Mock::new();
    config.stub().call("get", args!["mode"]).returns("dev");
    assert_eq!(
        config.call("get", args!["mode"]).unwrap().scalar(),
        Value::from("dev")
    );

    config.stub().call("get", args!["mode"]).returns("prod");
    assert_eq!(
        config.call("get", args!["mode"]).unwrap().scalar(),
        Value::from("prod")
    );
}

/// Stubs only answer calls with matching arguments.
#[test]
fn test_argument_sensitive_stubs() {
    let letters = Mock::new();
    letters.stub().call("h", args![0]).returns("a");
    letters.stub().call("h", args![1]).returns("b");

    assert_eq!(letters.call("h", args![0]).unwrap().scalar(), Value::from("a"));
    assert_eq!(letters.call("h", args![1]).unwrap().scalar(), Value::from("b"));
    assert_eq!(letters.call("h", args![2]).unwrap().scalar(), Value::Undef);
    assert_eq!(letters.call("h", args![0]).unwrap().list().len(), 1);
}

/// NaN and out-of-range integers make usable, distinct keys.
#[test]
fn test_edge_numbers_as_keys() {
    let meter = Mock::new();
    meter.stub().call("read", args![f64::NAN]).returns("invalid");
    meter.stub().extend("read", args![f64::NAN]).returns("still invalid");
    meter.stub().call("id", args![u64::MAX]).returns("max");

    assert_eq!(
        meter.call("read", args![f64::NAN]).unwrap().scalar(),
        Value::from("invalid")
    );
    assert_eq!(
        meter.call("read", args![f64::NAN]).unwrap().scalar(),
        Value::from("still invalid")
    );
    assert_eq!(meter.call("id", args![u64::MAX]).unwrap().scalar(), Value::from("max"));
    assert!(meter
        .call("id", args![i64::MAX as u64])
        .unwrap()
        .is_empty());

    meter
        .verify_that(Quantifier::exactly(2))
        .call("read", args![f64::NAN])
        .assert();
}

/// The most specific stub only wins when it is registered last.
#[test]
fn test_most_recent_match_wins() {
    let store = Mock::new();
    store.stub().call("get", args![anything()]).returns("fallback");
    store.stub().call("get", args!["known"]).returns("value");

    assert_eq!(
        store.call("get", args!["known"]).unwrap().scalar(),
        Value::from("value")
    );
    assert_eq!(
        store.call("get", args!["other"]).unwrap().scalar(),
        Value::from("fallback")
    );

    store.stub().call("get", args![anything()]).returns("shadow");
    assert_eq!(
        store.call("get", args!["known"]).unwrap().scalar(),
        Value::from("shadow")
    );
}

/// `extend` appends to the existing registration instead of starting over.
#[test]
fn test_extend_appends_to_existing_stub() {
    let queue = Mock::new();
    queue.stub().call("pop", args![]).returns(1);
    queue.stub().extend("pop", args![]).returns(2).returns_nothing();

    assert_eq!(queue.call("pop", args![]).unwrap().scalar(), Value::Int(1));
    assert_eq!(queue.call("pop", args![]).unwrap().scalar(), Value::Int(2));
    assert!(queue.call("pop", args![]).unwrap().is_empty());
    assert!(queue.call("pop", args![]).unwrap().is_empty());
}

/// Stubs keyed on matchers answer every call the matchers accept.
#[test]
fn test_matcher_stubs() {
    let limiter = Mock::new();
    limiter.stub().call("allow", args![gt(100)]).returns(false);
    limiter
        .stub()
        .call("allow", args![satisfies(|v| v.as_int() == Some(0), "is zero")])
        .raises("zero requests");

    assert_eq!(
        limiter.call("allow", args![500]).unwrap().scalar(),
        Value::Bool(false)
    );
    assert!(limiter.call("allow", args![50]).unwrap().is_empty());
    assert_eq!(
        limiter.call("allow", args![0]).unwrap_err().error,
        Value::from("zero requests")
    );
}

/// Argument lists must have the same length to match.
#[test]
fn test_arity_is_part_of_the_key() {
    let logger = Mock::new();
    logger
        .stub()
        .call("log", args![contains_str("error")])
        .returns(1);

    assert_eq!(
        logger.call("log", args!["an error"]).unwrap().scalar(),
        Value::Int(1)
    );
    assert!(logger
        .call("log", args!["an error", "extra"])
        .unwrap()
        .is_empty());
}

/// A stub can return several values at once.
#[test]
fn test_multiple_return_values() {
    let parser = Mock::new();
    parser
        .stub()
        .call("split", args!["a=b"])
        .returns_all(["a", "b"]);

    let returned = parser.call("split", args!["a=b"]).unwrap();
    assert_eq!(returned.scalar(), Value::from("a"));
    assert_eq!(returned.list(), &args!["a", "b"][..]);
}

/// Callbacks see the actual arguments and run on every matching call.
#[test]
fn test_callbacks_receive_arguments() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);

    let math = Mock::new();
    math.stub()
        .call("add", args![anything(), anything()])
        .executes(move |args| {
            counter.fetch_add(1, Ordering::SeqCst);
            match (args[0].as_int(), args[1].as_int()) {
                (Some(a), Some(b)) => Ok(args![a + b]),
                _ => Err(Value::from("not numbers")),
            }
        });

    assert_eq!(math.call("add", args![2, 3]).unwrap().scalar(), Value::Int(5));
    assert_eq!(math.call("add", args![10, -4]).unwrap().scalar(), Value::Int(6));
    let failure = math.call("add", args!["a", 1]).unwrap_err();
    assert_eq!(failure.operation, "add");
    assert_eq!(failure.error, Value::from("not numbers"));
    assert_eq!(runs.load(Ordering::SeqCst), 3);
}

/// Mocks may be returned from stubs and compared by identity.
#[test]
fn test_mocks_as_values() {
    let connection = Mock::with_class("Connection");
    let pool = Mock::with_class("Pool");
    pool.stub().call("acquire", args![]).returns(&connection);

    let acquired = pool.call("acquire", args![]).unwrap().scalar();
    assert!(acquired.as_mock().is_some_and(|m| m.same_as(&connection)));
    assert_eq!(acquired, Value::from(&connection));
    assert_ne!(acquired, Value::from(Mock::with_class("Connection")));
}

/// Mocks are shared between threads.
#[test]
fn test_calls_from_several_threads() {
    let counter = Mock::new();
    counter.stub().call("next", args![]).returns(1);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let counter = counter.clone();
            std::thread::spawn(move || {
                for _ in 0..25 {
                    assert_eq!(counter.call("next", args![]).unwrap().scalar(), Value::Int(1));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(counter.call_count(), 100);
    let invocations = counter.invocations();
    assert!(invocations.windows(2).all(|w| w[0].sequence < w[1].sequence));
}
