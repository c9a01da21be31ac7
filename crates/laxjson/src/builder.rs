//! The value-construction capability consumed by the parser.

use alloc::borrow::Cow;

use bstr::BStr;

use crate::{number::NumberInfo, stack::Key};

/// Location of a string literal in the input, quotes excluded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

/// Receives the structural events of a parse and builds values from them.
///
/// `Value` is an opaque handle chosen by the implementation: an owned tree
/// node, an arena index, a reference-counted pointer. Container handles are
/// owned by the parser's nesting stack between `start_*` and `end_*`, so
/// every handle stays alive until the parse finishes or fails.
///
/// Strings arrive decoded. They borrow from the input when the literal had no
/// escapes and are owned otherwise; `origin` is the literal's span in the
/// input either way.
///
/// The parser performs no rollback: when a parse fails, whatever the builder
/// did before the error stays done.
pub trait Builder<'src> {
    type Value;

    fn null(&mut self) -> Self::Value;
    fn boolean(&mut self, b: bool) -> Self::Value;

    fn start_array(&mut self) -> Self::Value;
    fn end_array(&mut self, _array: &mut Self::Value) {}
    fn array_append_value(&mut self, array: &mut Self::Value, value: Self::Value);
    fn array_append_number(&mut self, array: &mut Self::Value, number: &NumberInfo<'src>);
    fn array_append_string(&mut self, array: &mut Self::Value, s: Cow<'src, BStr>, origin: Span);

    fn start_object(&mut self) -> Self::Value;
    fn end_object(&mut self, _object: &mut Self::Value) {}
    fn object_set_value(&mut self, object: &mut Self::Value, key: Key<'src>, value: Self::Value);
    fn object_set_number(&mut self, object: &mut Self::Value, key: Key<'src>, number: &NumberInfo<'src>);
    fn object_set_string(
        &mut self,
        object: &mut Self::Value,
        key: Key<'src>,
        s: Cow<'src, BStr>,
        origin: Span,
    );

    /// Top-level sink for a value outside any container.
    fn add_value(&mut self, value: Self::Value);
    fn add_number(&mut self, number: &NumberInfo<'src>);
    fn add_string(&mut self, s: Cow<'src, BStr>, origin: Span);
}
