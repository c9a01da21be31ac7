//! Explicit stack of open containers.
//!
//! Each frame records what token may legally come next in its container and,
//! for objects, the key that is waiting for its value. Frames own the
//! builder's container handle until the matching close is validated.

use alloc::{borrow::Cow, vec::Vec};
use core::fmt;

use bstr::BStr;

/// An object key awaiting its value.
///
/// Borrowed when the key is a verbatim span of the input, owned when it had
/// escapes and had to be decoded.
pub type Key<'src> = Cow<'src, BStr>;

/// What the innermost container expects to see next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// Top level, no container.
    None,
    ArrayNew,
    ArrayElement,
    ArrayComma,
    ObjectNew,
    ObjectKey,
    ObjectColon,
    ObjectValue,
    ObjectComma,
}

impl Next {
    /// Whether this state belongs to an array frame.
    #[must_use]
    pub fn is_array(self) -> bool {
        matches!(self, Next::ArrayNew | Next::ArrayElement | Next::ArrayComma)
    }

    /// Whether this state belongs to an object frame.
    #[must_use]
    pub fn is_object(self) -> bool {
        matches!(
            self,
            Next::ObjectNew
                | Next::ObjectKey
                | Next::ObjectColon
                | Next::ObjectValue
                | Next::ObjectComma
        )
    }
}

impl fmt::Display for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Next::None => "nothing",
            Next::ArrayNew => "array element or close",
            Next::ArrayElement => "array element",
            Next::ArrayComma | Next::ObjectComma => "comma",
            Next::ObjectNew => "object key or close",
            Next::ObjectKey => "object key",
            Next::ObjectColon => "colon",
            Next::ObjectValue => "object value",
        })
    }
}

/// One open array or object.
#[derive(Debug)]
pub(crate) struct Frame<'src, V> {
    pub(crate) value: V,
    pub(crate) next: Next,
    pub(crate) key: Option<Key<'src>>,
}

impl<'src, V> Frame<'src, V> {
    pub(crate) fn array(value: V) -> Self {
        Self { value, next: Next::ArrayNew, key: None }
    }

    pub(crate) fn object(value: V) -> Self {
        Self { value, next: Next::ObjectNew, key: None }
    }
}

#[derive(Debug)]
pub(crate) struct NestingStack<'src, V> {
    frames: Vec<Frame<'src, V>>,
}

impl<'src, V> NestingStack<'src, V> {
    pub(crate) fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub(crate) fn push(&mut self, frame: Frame<'src, V>) {
        self.frames.push(frame);
    }

    pub(crate) fn pop(&mut self) -> Option<Frame<'src, V>> {
        self.frames.pop()
    }

    pub(crate) fn peek(&self) -> Option<&Frame<'src, V>> {
        self.frames.last()
    }

    pub(crate) fn peek_mut(&mut self) -> Option<&mut Frame<'src, V>> {
        self.frames.last_mut()
    }

    /// Expectation of the innermost frame, `Next::None` at top level.
    pub(crate) fn next(&self) -> Next {
        self.peek().map_or(Next::None, |f| f.next)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }
}
