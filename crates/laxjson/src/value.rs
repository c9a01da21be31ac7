//! An owned document tree and the builder that produces it.
//!
//! This module defines the [`Value`] enum, which can hold anything the
//! grammar accepts, and [`ValueBuilder`], the stock [`Builder`] behind
//! [`parse`](crate::parse) and friends.

use alloc::{borrow::Cow, vec::Vec};
use core::fmt::{self, Write as _};

use bstr::{BStr, BString, ByteSlice};
use indexmap::IndexMap;

use crate::{
    builder::{Builder, Span},
    number::{Number, NumberInfo},
    stack::Key,
};

/// Object members in input order.
pub type Map = IndexMap<BString, Value, hashbrown::DefaultHashBuilder>;
pub type Array = Vec<Value>;

/// A parsed value.
///
/// Strings and keys are byte strings: input bytes that are not valid UTF-8
/// pass through unchanged.
///
/// # Examples
///
/// ```
/// use laxjson::{Map, Number, Value};
///
/// let mut map = Map::default();
/// map.insert("key".into(), Value::String("value".into()));
/// map.insert("n".into(), Value::Number(Number::Float(f64::INFINITY)));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value","n":Infinity}"#);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Number(Number),
    String(BString),
    Array(Array),
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(Number::Int(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(Number::Float(v))
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<BString> for Value {
    fn from(v: BString) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bstr(&self) -> Option<&BStr> {
        match self {
            Self::String(s) => Some(s.as_bstr()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(m) => Some(m),
            _ => None,
        }
    }

    /// Looks up `key` when the value is an object.
    ///
    /// ```
    /// let v = laxjson::parse(r#"{"a": [1, 2]}"#).unwrap();
    /// assert_eq!(v.get("a").and_then(|a| a.as_array()).map(Vec::len), Some(2));
    /// assert!(v.get("b").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Value> {
        self.as_object()?.get(key.as_ref().as_bstr())
    }
}

/// Writes `src` as a quoted string literal the parser reads back unchanged.
///
/// Byte sequences that are not valid UTF-8 are written as U+FFFD.
fn write_quoted<W: fmt::Write>(src: &BStr, f: &mut W) -> fmt::Result {
    f.write_char('"')?;
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_ascii_control() => write!(f, "\\u{:04X}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write_quoted(s.as_bstr(), f),
            Value::Array(arr) => {
                f.write_str("[")?;
                let mut first = true;
                for v in arr {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in map {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write_quoted(k.as_bstr(), f)?;
                    write!(f, ":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Drops nested containers from a heap worklist instead of recursing, so a
/// deeply nested tree cannot exhaust the stack.
impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = match self {
            Value::Array(items) if !items.is_empty() => core::mem::take(items),
            Value::Object(map) if !map.is_empty() => map.drain(..).map(|(_, v)| v).collect(),
            _ => return,
        };
        while let Some(mut value) = pending.pop() {
            match &mut value {
                Value::Array(items) => pending.append(items),
                Value::Object(map) => pending.extend(map.drain(..).map(|(_, v)| v)),
                _ => {}
            }
        }
    }
}

/// Builds [`Value`] trees and collects the top-level values in order.
///
/// Duplicate object keys keep the position of their first occurrence and
/// the value of their last.
#[derive(Debug, Default)]
pub struct ValueBuilder {
    roots: Vec<Value>,
}

impl ValueBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level values received so far.
    #[must_use]
    pub fn roots(&self) -> &[Value] {
        &self.roots
    }

    #[must_use]
    pub fn into_roots(self) -> Vec<Value> {
        self.roots
    }
}

fn string_value(s: Cow<'_, BStr>) -> Value {
    Value::String(s.into_owned())
}

impl<'src> Builder<'src> for ValueBuilder {
    type Value = Value;

    fn null(&mut self) -> Value {
        Value::Null
    }

    fn boolean(&mut self, b: bool) -> Value {
        Value::Boolean(b)
    }

    fn start_array(&mut self) -> Value {
        Value::Array(Vec::new())
    }

    fn array_append_value(&mut self, array: &mut Value, value: Value) {
        if let Value::Array(items) = array {
            items.push(value);
        }
    }

    fn array_append_number(&mut self, array: &mut Value, number: &NumberInfo<'src>) {
        self.array_append_value(array, Value::Number(number.to_number()));
    }

    fn array_append_string(&mut self, array: &mut Value, s: Cow<'src, BStr>, _origin: Span) {
        self.array_append_value(array, string_value(s));
    }

    fn start_object(&mut self) -> Value {
        Value::Object(Map::default())
    }

    fn object_set_value(&mut self, object: &mut Value, key: Key<'src>, value: Value) {
        if let Value::Object(map) = object {
            map.insert(key.into_owned(), value);
        }
    }

    fn object_set_number(&mut self, object: &mut Value, key: Key<'src>, number: &NumberInfo<'src>) {
        self.object_set_value(object, key, Value::Number(number.to_number()));
    }

    fn object_set_string(
        &mut self,
        object: &mut Value,
        key: Key<'src>,
        s: Cow<'src, BStr>,
        _origin: Span,
    ) {
        self.object_set_value(object, key, string_value(s));
    }

    fn add_value(&mut self, value: Value) {
        self.roots.push(value);
    }

    fn add_number(&mut self, number: &NumberInfo<'src>) {
        self.roots.push(Value::Number(number.to_number()));
    }

    fn add_string(&mut self, s: Cow<'src, BStr>, _origin: Span) {
        self.roots.push(string_value(s));
    }
}
