//! A single-pass parser for a superset of JSON.
//!
//! On top of standard JSON the grammar accepts
//!
//! - `Infinity`, `-Infinity` and `NaN` as numbers (`NaN` may also be spelled
//!   `Nan`, `naN` or `nan`),
//! - `/* block */` and `// line` comments between any two tokens,
//! - numbers of any size or precision: literals that do not fit in an `i64`,
//!   or have more than 14 significant digits, keep their text so an exact
//!   big integer or decimal can be built from them.
//!
//! The parser does not build anything itself. It reports what it finds to a
//! [`Builder`], which decides what a value is. [`ValueBuilder`] builds owned
//! [`Value`] trees and backs the convenience functions [`parse`],
//! [`parse_with`] and [`parse_many`]; [`EventRecorder`] records the calls.
//!
//! ```
//! use laxjson::{Number, Value};
//!
//! let v = laxjson::parse(b"{\"big\": 123456789012345678901234567890, /* note */ \"inf\": -Infinity}")?;
//! assert_eq!(v.get("inf"), Some(&Value::Number(Number::Float(f64::NEG_INFINITY))));
//! assert_eq!(v.get("big").map(ToString::to_string).as_deref(), Some("123456789012345678901234567890"));
//! # Ok::<(), laxjson::ParseError>(())
//! ```
//!
//! Parsing stops at the first error. The returned [`ParseError`] says whether
//! the problem was lexical or structural, what was expected, and where it
//! was found.

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod builder;
mod comment;
mod error;
mod event;
mod number;
mod options;
mod parser;
mod reader;
mod stack;
mod string;
#[cfg(feature = "values")]
mod value;

#[cfg(all(test, feature = "values"))]
mod tests;

pub use builder::{Builder, Span};
pub use error::{Container, ErrorKind, ParseError, Reason};
pub use event::{BuildEvent, EventRecorder, Id, RawNumber, Text};
pub use number::{MAX_EXPONENT, MAX_SIGNIFICANT_DIGITS, Number, NumberInfo};
pub use options::{NumberMode, ParserOptions};
pub use stack::{Key, Next};
#[cfg(feature = "values")]
pub use value::{Array, Map, Value, ValueBuilder};

use parser::ParseContext;

/// Parses `input`, reporting everything it contains to `builder`.
///
/// Returns the number of top-level values passed to the builder's `add_*`
/// sink. Input that holds only whitespace and comments yields `Ok(0)`.
///
/// # Errors
///
/// Returns the first lexical or structural error. Builder calls made before
/// it are not undone.
pub fn parse_into<'src, B: Builder<'src>>(
    input: &'src (impl AsRef<[u8]> + ?Sized),
    options: ParserOptions,
    builder: &mut B,
) -> Result<usize, ParseError> {
    ParseContext::new(input.as_ref(), options, builder).parse()
}

/// Parses a single value with the default options.
///
/// # Errors
///
/// Fails on malformed input, on anything but comments after the value, and
/// with [`Reason::NoValue`] when there is no value at all.
#[cfg(feature = "values")]
pub fn parse(input: &(impl AsRef<[u8]> + ?Sized)) -> Result<Value, ParseError> {
    parse_with(input, ParserOptions::default())
}

/// Parses a value with the given options.
///
/// With [`ParserOptions::allow_multiple_values`] set, every top-level value
/// is parsed and the last one is returned.
///
/// # Errors
///
/// As [`parse`].
#[cfg(feature = "values")]
pub fn parse_with(
    input: &(impl AsRef<[u8]> + ?Sized),
    options: ParserOptions,
) -> Result<Value, ParseError> {
    let input = input.as_ref();
    let mut builder = ValueBuilder::new();
    parse_into(input, options, &mut builder)?;
    match builder.into_roots().pop() {
        Some(value) => Ok(value),
        None => Err(reader::error_at_end(input, Reason::NoValue)),
    }
}

/// Parses every top-level value in `input`.
///
/// Multiple values are accepted regardless of
/// [`ParserOptions::allow_multiple_values`].
///
/// ```
/// use laxjson::{ParserOptions, Value};
///
/// let values = laxjson::parse_many("1 // one\n[2] \"three\"", ParserOptions::default())?;
/// assert_eq!(values.len(), 3);
/// assert_eq!(values[2], Value::from("three"));
/// # Ok::<(), laxjson::ParseError>(())
/// ```
///
/// # Errors
///
/// As [`parse_into`].
#[cfg(feature = "values")]
pub fn parse_many(
    input: &(impl AsRef<[u8]> + ?Sized),
    options: ParserOptions,
) -> Result<alloc::vec::Vec<Value>, ParseError> {
    let options = ParserOptions { allow_multiple_values: true, ..options };
    let mut builder = ValueBuilder::new();
    parse_into(input, options, &mut builder)?;
    Ok(builder.into_roots())
}

/// Failure of [`from_reader`].
#[cfg(all(feature = "std", feature = "values"))]
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Reads `reader` to the end and parses what it produced.
///
/// # Errors
///
/// [`ReadError::Io`] when reading fails, [`ReadError::Parse`] as
/// [`parse_with`].
#[cfg(all(feature = "std", feature = "values"))]
pub fn from_reader(
    mut reader: impl std::io::Read,
    options: ParserOptions,
) -> Result<Value, ReadError> {
    let mut input = alloc::vec::Vec::new();
    reader.read_to_end(&mut input)?;
    log::debug!("read {} bytes", input.len());
    Ok(parse_with(&input, options)?)
}
