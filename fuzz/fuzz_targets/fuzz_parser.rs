#![no_main]

use arbitrary::Arbitrary;
use laxjson::{EventRecorder, NumberMode, ParserOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Mode {
    ExactDecimal,
    FloatOnOverflow,
    AlwaysDecimal,
}

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    mode: Mode,
    allow_multiple_values: bool,
    data: &'a [u8],
}

fuzz_target!(|input: Input<'_>| {
    let options = ParserOptions {
        number_mode: match input.mode {
            Mode::ExactDecimal => NumberMode::ExactDecimal,
            Mode::FloatOnOverflow => NumberMode::FloatOnOverflow,
            Mode::AlwaysDecimal => NumberMode::AlwaysDecimal,
        },
        allow_multiple_values: input.allow_multiple_values,
    };

    // Never panics, and the recorder sees the same outcome as the tree builder.
    let mut rec = EventRecorder::new();
    let recorded = laxjson::parse_into(input.data, options, &mut rec);
    let parsed = laxjson::parse_many(input.data, options);
    if let Ok(count) = recorded {
        assert_eq!(parsed.as_ref().map(Vec::len).ok(), Some(count));
    }

    // Whatever is standard JSON is accepted.
    if serde_json::from_slice::<serde_json::Value>(input.data).is_ok() {
        let value = laxjson::parse_with(input.data, options)
            .unwrap_or_else(|err| panic!("rejected standard JSON: {err}"));
        // And its printed form is accepted too.
        let printed = value.to_string();
        if let Err(err) = laxjson::parse(&printed) {
            panic!("rejected printed value {printed:?}: {err}");
        }
    }
});
