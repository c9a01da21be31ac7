//! Byte cursor over an in-memory input.
//!
//! The reader owns the position, end-of-input detection and the protected
//! mark used to capture zero-copy spans. End of input is reported as `None`;
//! a NUL byte is ordinary data.

use crate::error::{ParseError, Reason};

#[derive(Debug, Clone)]
pub(crate) struct Reader<'src> {
    input: &'src [u8],
    pos: usize,
    line: usize,
    line_start: usize,
    mark: Option<usize>,
}

impl<'src> Reader<'src> {
    pub(crate) fn new(input: &'src [u8]) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            line_start: 0,
            mark: None,
        }
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Returns the next byte and advances past it.
    #[inline]
    pub(crate) fn get(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(b)
    }

    /// Consumes `literal` if the input continues with it.
    ///
    /// On a mismatch the offending byte is consumed too, so an error raised
    /// afterwards points at it.
    pub(crate) fn expect(&mut self, literal: &[u8]) -> bool {
        literal.iter().all(|&want| self.get() == Some(want))
    }

    /// Skips whitespace and returns the first significant byte, consuming it.
    pub(crate) fn next_non_white(&mut self) -> Option<u8> {
        loop {
            match self.get()? {
                b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' => {}
                b => return Some(b),
            }
        }
    }

    /// Marks the current position as the start of a zero-copy span.
    #[inline]
    pub(crate) fn protect(&mut self) {
        self.mark = Some(self.pos);
    }

    /// Marks the most recently consumed byte as the start of a span, for
    /// tokens whose first byte was read by the dispatcher.
    #[inline]
    pub(crate) fn protect_last(&mut self) {
        self.mark = Some(self.pos.saturating_sub(1));
    }

    #[inline]
    pub(crate) fn reset(&mut self) {
        self.mark = None;
    }

    /// The span from the protected mark up to (not including) the cursor.
    pub(crate) fn protected(&self) -> &'src [u8] {
        let start = self.mark.unwrap_or(self.pos);
        &self.input[start..self.pos]
    }

    /// Offset of the protected mark, or the cursor if nothing is protected.
    pub(crate) fn mark(&self) -> usize {
        self.mark.unwrap_or(self.pos)
    }

    /// Whether `span` aliases the reader's buffer, so it stays valid for the
    /// whole parse and does not need an owned copy.
    pub(crate) fn in_protected_region(&self, span: &[u8]) -> bool {
        let region = self.input.as_ptr_range();
        let candidate = span.as_ptr_range();
        region.start <= candidate.start && candidate.end <= region.end
    }

    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.pos
    }

    /// 1-based column of the cursor, counted in bytes.
    pub(crate) fn column(&self) -> usize {
        self.pos - self.line_start + 1
    }

    /// Position of the cursor as `(offset, line, column)`.
    pub(crate) fn position(&self) -> (usize, usize, usize) {
        (self.pos, self.line, self.column())
    }

    /// Position of the most recently consumed byte, so errors point at the
    /// offending byte rather than past it.
    pub(crate) fn last_position(&self) -> (usize, usize, usize) {
        if self.pos > self.line_start {
            (self.pos - 1, self.line, self.pos - self.line_start)
        } else {
            self.position()
        }
    }

    /// Builds an error positioned at the most recently consumed byte.
    #[track_caller]
    pub(crate) fn error(&self, reason: Reason) -> ParseError {
        let (offset, line, column) = self.last_position();
        ParseError::new(reason, offset, line, column)
    }
}

/// Builds an error positioned at the last byte of `input`.
#[cfg(feature = "values")]
#[track_caller]
pub(crate) fn error_at_end(input: &[u8], reason: Reason) -> ParseError {
    let mut rd = Reader::new(input);
    while rd.get().is_some() {}
    rd.error(reason)
}
