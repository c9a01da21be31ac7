//! A [`Builder`] that records the calls it receives.
//!
//! Handles are sequential ids, so a recording shows exactly which container
//! every value went into. Useful for debugging a builder implementation and
//! for snapshot tests of the parser's event stream.
//!
//! ```
//! use laxjson::{EventRecorder, ParserOptions};
//!
//! let mut rec = EventRecorder::new();
//! laxjson::parse_into(r#"[1, "a"]"#, ParserOptions::default(), &mut rec).unwrap();
//! assert_eq!(
//!     rec.to_string(),
//!     "start_array #0\n#0[] = number 1\n#0[] = string \"a\" at 5+1\nend_array #0\nroot = #0\n",
//! );
//! ```

use alloc::{borrow::Cow, vec::Vec};
use core::fmt;

use bstr::{BStr, BString};

use crate::{
    builder::{Builder, Span},
    number::NumberInfo,
    stack::Key,
};

/// Handle handed out by [`EventRecorder`].
pub type Id = usize;

/// Decoded text together with how it reached the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub bytes: BString,
    /// Whether the builder received a span of the input rather than a
    /// decoded copy.
    pub borrowed: bool,
}

impl From<Cow<'_, BStr>> for Text {
    fn from(s: Cow<'_, BStr>) -> Self {
        let borrowed = matches!(s, Cow::Borrowed(_));
        Self { bytes: s.into_owned(), borrowed }
    }
}

/// Owned text is prefixed with `~`.
impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.borrowed {
            f.write_str("~")?;
        }
        write!(f, "{:?}", self.bytes)
    }
}

/// A number as the builder saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNumber {
    pub raw: BString,
    pub large: bool,
}

impl From<&NumberInfo<'_>> for RawNumber {
    fn from(ni: &NumberInfo<'_>) -> Self {
        Self { raw: ni.raw.into(), large: ni.large }
    }
}

impl fmt::Display for RawNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "number {}", self.raw)?;
        if self.large {
            f.write_str(" (large)")?;
        }
        Ok(())
    }
}

/// One builder call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    Null { id: Id },
    Boolean { id: Id, value: bool },
    StartArray { id: Id },
    EndArray { id: Id },
    ArrayAppend { array: Id, value: Id },
    ArrayAppendNumber { array: Id, number: RawNumber },
    ArrayAppendString { array: Id, text: Text, origin: Span },
    StartObject { id: Id },
    EndObject { id: Id },
    ObjectSet { object: Id, key: Text, value: Id },
    ObjectSetNumber { object: Id, key: Text, number: RawNumber },
    ObjectSetString { object: Id, key: Text, text: Text, origin: Span },
    AddValue { value: Id },
    AddNumber { number: RawNumber },
    AddString { text: Text, origin: Span },
}

impl fmt::Display for BuildEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildEvent::Null { id } => write!(f, "null #{id}"),
            BuildEvent::Boolean { id, value } => write!(f, "bool #{id} {value}"),
            BuildEvent::StartArray { id } => write!(f, "start_array #{id}"),
            BuildEvent::EndArray { id } => write!(f, "end_array #{id}"),
            BuildEvent::ArrayAppend { array, value } => write!(f, "#{array}[] = #{value}"),
            BuildEvent::ArrayAppendNumber { array, number } => write!(f, "#{array}[] = {number}"),
            BuildEvent::ArrayAppendString { array, text, origin } => {
                write!(f, "#{array}[] = string {text} at {}+{}", origin.start, origin.len)
            }
            BuildEvent::StartObject { id } => write!(f, "start_object #{id}"),
            BuildEvent::EndObject { id } => write!(f, "end_object #{id}"),
            BuildEvent::ObjectSet { object, key, value } => write!(f, "#{object}[{key}] = #{value}"),
            BuildEvent::ObjectSetNumber { object, key, number } => {
                write!(f, "#{object}[{key}] = {number}")
            }
            BuildEvent::ObjectSetString { object, key, text, origin } => {
                write!(f, "#{object}[{key}] = string {text} at {}+{}", origin.start, origin.len)
            }
            BuildEvent::AddValue { value } => write!(f, "root = #{value}"),
            BuildEvent::AddNumber { number } => write!(f, "root = {number}"),
            BuildEvent::AddString { text, origin } => {
                write!(f, "root = string {text} at {}+{}", origin.start, origin.len)
            }
        }
    }
}

/// Records every builder call as a [`BuildEvent`].
///
/// Its `Display` output is one event per line.
#[derive(Debug, Default)]
pub struct EventRecorder {
    next_id: Id,
    events: Vec<BuildEvent>,
}

impl EventRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[BuildEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<BuildEvent> {
        self.events
    }

    fn alloc(&mut self) -> Id {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl fmt::Display for EventRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "{event}")?;
        }
        Ok(())
    }
}

impl<'src> Builder<'src> for EventRecorder {
    type Value = Id;

    fn null(&mut self) -> Id {
        let id = self.alloc();
        self.events.push(BuildEvent::Null { id });
        id
    }

    fn boolean(&mut self, value: bool) -> Id {
        let id = self.alloc();
        self.events.push(BuildEvent::Boolean { id, value });
        id
    }

    fn start_array(&mut self) -> Id {
        let id = self.alloc();
        self.events.push(BuildEvent::StartArray { id });
        id
    }

    fn end_array(&mut self, array: &mut Id) {
        self.events.push(BuildEvent::EndArray { id: *array });
    }

    fn array_append_value(&mut self, array: &mut Id, value: Id) {
        self.events.push(BuildEvent::ArrayAppend { array: *array, value });
    }

    fn array_append_number(&mut self, array: &mut Id, number: &NumberInfo<'src>) {
        self.events.push(BuildEvent::ArrayAppendNumber { array: *array, number: number.into() });
    }

    fn array_append_string(&mut self, array: &mut Id, s: Cow<'src, BStr>, origin: Span) {
        self.events.push(BuildEvent::ArrayAppendString { array: *array, text: s.into(), origin });
    }

    fn start_object(&mut self) -> Id {
        let id = self.alloc();
        self.events.push(BuildEvent::StartObject { id });
        id
    }

    fn end_object(&mut self, object: &mut Id) {
        self.events.push(BuildEvent::EndObject { id: *object });
    }

    fn object_set_value(&mut self, object: &mut Id, key: Key<'src>, value: Id) {
        self.events.push(BuildEvent::ObjectSet { object: *object, key: key.into(), value });
    }

    fn object_set_number(&mut self, object: &mut Id, key: Key<'src>, number: &NumberInfo<'src>) {
        self.events.push(BuildEvent::ObjectSetNumber {
            object: *object,
            key: key.into(),
            number: number.into(),
        });
    }

    fn object_set_string(&mut self, object: &mut Id, key: Key<'src>, s: Cow<'src, BStr>, origin: Span) {
        self.events.push(BuildEvent::ObjectSetString {
            object: *object,
            key: key.into(),
            text: s.into(),
            origin,
        });
    }

    fn add_value(&mut self, value: Id) {
        self.events.push(BuildEvent::AddValue { value });
    }

    fn add_number(&mut self, number: &NumberInfo<'src>) {
        self.events.push(BuildEvent::AddNumber { number: number.into() });
    }

    fn add_string(&mut self, s: Cow<'src, BStr>, origin: Span) {
        self.events.push(BuildEvent::AddString { text: s.into(), origin });
    }
}
