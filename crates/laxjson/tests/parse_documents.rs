#![expect(missing_docs)]

use laxjson::{Number, ParserOptions, Value};
use serde_json::Value as Json;

const MANIFEST: &str = r#"
{
    "moderation": {
        "decision": "allow",
        "reason": null
    },
    "request": {
        "filename": "example.rs",
        "language": "rust",
        "options": {
            "opt_level": 2,
            "features": ["serde", "tokio"]
        }
    },
    "snippets": ["fn main() {}", "println!(\"hi\")"],
    "scores": [0.5, -1.25, 3e2, 1E-3, 0, -7, 42],
    "unicode": "café 😀  ",
    "empty": [{}, [], ""]
}
"#;

const COMMENTED: &str = r#"
// A commented variant of a plain document.
{
    "name": "laxjson", /* inline */
    "version": [0, 1, 0], // trailing
    /* before a key */ "flags": {"fast": true, "exact": false}
}
/* after the value */
"#;

const PLAIN: &str = r#"
{
    "name": "laxjson",
    "version": [0, 1, 0],
    "flags": {"fast": true, "exact": false}
}
"#;

#[track_caller]
fn assert_same(lax: &Value, json: &Json) {
    match (lax, json) {
        (Value::Null, Json::Null) => {}
        (Value::Boolean(a), Json::Bool(b)) => assert_eq!(a, b),
        (Value::Number(Number::Int(a)), Json::Number(b)) => assert_eq!(Some(*a), b.as_i64()),
        (Value::Number(a), Json::Number(b)) => {
            let (a, b) = (a.as_f64(), b.as_f64().unwrap());
            assert!((a - b).abs() <= b.abs() * 1e-12, "{a} != {b}");
        }
        (Value::String(a), Json::String(b)) => assert_eq!(a, b.as_bytes()),
        (Value::Array(a), Json::Array(b)) => {
            assert_eq!(a.len(), b.len());
            for (a, b) in a.iter().zip(b) {
                assert_same(a, b);
            }
        }
        (Value::Object(a), Json::Object(b)) => {
            assert_eq!(a.len(), b.len());
            for ((ka, va), (kb, vb)) in a.iter().zip(b) {
                assert_eq!(ka, kb.as_bytes());
                assert_same(va, vb);
            }
        }
        (a, b) => panic!("{a} does not match {b}"),
    }
}

#[test]
fn standard_json_matches_serde_json() {
    let lax = laxjson::parse(MANIFEST).unwrap();
    let json: Json = serde_json::from_str(MANIFEST).unwrap();
    assert_same(&lax, &json);
}

#[test]
fn comments_do_not_change_the_document() {
    let lax = laxjson::parse(COMMENTED).unwrap();
    let json: Json = serde_json::from_str(PLAIN).unwrap();
    assert_same(&lax, &json);
    assert_eq!(lax, laxjson::parse(PLAIN).unwrap());
}

#[test]
fn json_lines() {
    let lines = "{\"id\": 1}\n{\"id\": 2}\n{\"id\": 3}\n";
    let values = laxjson::parse_many(lines, ParserOptions::default()).unwrap();
    let ids: Vec<_> = values
        .iter()
        .filter_map(|v| v.get("id")?.as_number()?.as_i64())
        .collect();
    assert_eq!(ids, [1, 2, 3]);
    for (value, line) in values.iter().zip(lines.lines()) {
        assert_same(value, &serde_json::from_str(line).unwrap());
    }
}

#[test]
fn printed_values_are_standard_json_when_finite() {
    let lax = laxjson::parse(MANIFEST).unwrap();
    let reparsed: Json = serde_json::from_str(&lax.to_string()).unwrap();
    assert_same(&lax, &reparsed);
}

#[cfg(feature = "std")]
mod from_reader {
    use std::io;

    use laxjson::{ParserOptions, ReadError, Reason};

    struct Broken;

    impl io::Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn reads_to_the_end() {
        let value = laxjson::from_reader(io::Cursor::new(super::COMMENTED), ParserOptions::default())
            .unwrap();
        assert_eq!(value, laxjson::parse(super::PLAIN).unwrap());
    }

    #[test]
    fn separates_io_and_parse_errors() {
        let err = laxjson::from_reader(Broken, ParserOptions::default()).unwrap_err();
        assert!(matches!(err, ReadError::Io(_)), "{err}");

        let err = laxjson::from_reader(io::Cursor::new("[1,"), ParserOptions::default()).unwrap_err();
        assert!(matches!(err, ReadError::Parse(ref e) if e.reason == Reason::Unterminated(laxjson::Container::Array)));
    }
}
