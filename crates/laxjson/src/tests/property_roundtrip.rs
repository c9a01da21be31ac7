use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use std::dbg;

use quickcheck::{QuickCheck, TestResult};
use quickcheck_macros::quickcheck;

use crate::{EventRecorder, Number, ParserOptions, Value, parse, parse_into, parse_many};

fn tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Property: printing a value and parsing the text gives the value back.
#[test]
fn print_parse_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> TestResult {
        let printed = value.to_string();
        match parse(&printed) {
            Ok(parsed) if parsed == value => TestResult::passed(),
            other => {
                dbg!(&printed, &value, &other);
                TestResult::failed()
            }
        }
    }

    QuickCheck::new().tests(tests()).quickcheck(prop as fn(Value) -> TestResult);
}

/// Property: comments and whitespace between top-level values do not change
/// what is parsed, and values come back in order.
#[test]
fn multi_value_with_comments_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(values: Vec<Value>, separators: Vec<u8>) -> TestResult {
        if values.is_empty() {
            return TestResult::discard();
        }

        let mut payload = String::new();
        for (i, value) in values.iter().enumerate() {
            payload.push_str(&value.to_string());
            payload.push_str(match separators.get(i).map(|s| s % 4) {
                Some(0) => " /* between */ ",
                Some(1) => "// to end of line\n",
                Some(2) => "\n\t",
                _ => " ",
            });
        }

        match parse_many(&payload, ParserOptions::default()) {
            Ok(parsed) if parsed == values => TestResult::passed(),
            other => {
                dbg!(&payload, &values, &other);
                TestResult::failed()
            }
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<Value>, Vec<u8>) -> TestResult);
}

/// Property: the printed form is a fixed point of parse-then-print.
#[test]
fn print_is_idempotent_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value) -> bool {
        let once = value.to_string();
        parse(&once).is_ok_and(|v| v.to_string() == once)
    }

    QuickCheck::new().tests(tests()).quickcheck(prop as fn(Value) -> bool);
}

/// Property: two independent parses of the same text make the same builder
/// calls in the same order.
#[test]
fn builder_calls_are_repeatable_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(value: Value, commented: bool) -> TestResult {
        let mut text = value.to_string();
        if commented {
            text.insert_str(0, "/* lead */ ");
            text.push_str(" // tail");
        }

        let mut first = EventRecorder::new();
        let mut second = EventRecorder::new();
        let a = parse_into(&text, ParserOptions::default(), &mut first);
        let b = parse_into(&text, ParserOptions::default(), &mut second);
        if a.is_ok_and(|n| n == 1) && b.is_ok_and(|n| n == 1) && first.events() == second.events() {
            TestResult::passed()
        } else {
            dbg!(&text, first.events(), second.events());
            TestResult::failed()
        }
    }

    QuickCheck::new().tests(tests()).quickcheck(prop as fn(Value, bool) -> TestResult);
}

/// Property: every `i64` survives, whether it is kept fixed-width or promoted
/// to a big integer.
#[quickcheck]
fn integers_are_exact(n: i64) -> bool {
    parse(&n.to_string())
        .ok()
        .and_then(|v| v.as_number().and_then(Number::as_i64))
        == Some(n)
}
