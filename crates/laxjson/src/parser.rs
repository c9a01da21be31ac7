//! The dispatcher: one pass over the input, driven by a single significant
//! byte of lookahead.
//!
//! Overview
//! - [`ParseContext::parse`] repeatedly asks the reader for the next
//!   non-whitespace byte and routes it to the string decoder, the number
//!   lexer, the comment skipper, a literal matcher, or a nesting transition.
//! - Completed values go through [`ParseContext::add`], which consults the
//!   innermost frame to decide whether the value is an array element, an
//!   object key, an object value, or a top-level value for the builder's
//!   sink.
//! - Closing a container pops its frame and feeds the finished container
//!   back through `add`, so it lands in its parent like any other value.
//!
//! The first error stops the loop. Nothing is read after it and nothing the
//! builder already did is undone.

use alloc::borrow::Cow;

use bstr::BStr;

use crate::{
    builder::{Builder, Span},
    comment::skip_comment,
    error::{Container, ParseError, Reason},
    number::{NumberInfo, read_number},
    options::ParserOptions,
    reader::Reader,
    stack::{Frame, NestingStack, Next},
    string::read_string,
};

/// A value that is ready to be placed by the nesting state.
enum Completed<'src, V> {
    Value(V),
    Number(NumberInfo<'src>),
    String(Cow<'src, BStr>, Span),
}

impl<V> Completed<'_, V> {
    fn describe(&self) -> &'static str {
        match self {
            Completed::Value(_) | Completed::Number(_) => "a value",
            Completed::String(..) => "a string",
        }
    }
}

/// State of a single parse. Created per call and consumed by it.
pub(crate) struct ParseContext<'src, 'b, B: Builder<'src>> {
    rd: Reader<'src>,
    stack: NestingStack<'src, B::Value>,
    error: Option<ParseError>,
    options: ParserOptions,
    builder: &'b mut B,
    values: usize,
}

impl<'src, 'b, B: Builder<'src>> ParseContext<'src, 'b, B> {
    pub(crate) fn new(input: &'src [u8], options: ParserOptions, builder: &'b mut B) -> Self {
        Self {
            rd: Reader::new(input),
            stack: NestingStack::new(),
            error: None,
            options,
            builder,
            values: 0,
        }
    }

    /// Runs the parse to completion.
    ///
    /// Returns the number of top-level values handed to the builder's sink.
    pub(crate) fn parse(mut self) -> Result<usize, ParseError> {
        log::debug!("parse started: {:?}", self.options);
        while let Some(c) = self.rd.next_non_white() {
            if let Err(err) = self.dispatch(c) {
                self.fail(err);
            }
            if self.error.is_some() {
                break;
            }
        }
        if self.error.is_none() {
            if let Err(err) = self.check_terminated() {
                self.fail(err);
            }
        }

        match self.error {
            Some(err) => {
                log::debug!("parse failed: {err} (detected at {})", err.location);
                Err(err)
            }
            None => {
                log::debug!("parse finished: {} top-level value(s)", self.values);
                Ok(self.values)
            }
        }
    }

    /// Records `err` unless an earlier error is already recorded.
    fn fail(&mut self, err: ParseError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn dispatch(&mut self, c: u8) -> Result<(), ParseError> {
        if c != b'/'
            && self.stack.is_empty()
            && self.values > 0
            && !self.options.allow_multiple_values
        {
            return Err(self.rd.error(Reason::TrailingData));
        }

        match c {
            b'{' => self.object_start(),
            b'}' => self.object_end(),
            b'[' => self.array_start(),
            b']' => self.array_end(),
            b':' => self.colon(),
            b',' => self.comma(),
            b'"' => {
                let (s, origin) = read_string(&mut self.rd)?;
                self.add(Completed::String(s, origin))
            }
            b'+' | b'-' | b'0'..=b'9' | b'I' | b'N' => self.read_num(c),
            b't' => self.read_literal(b"rue", "true", true),
            b'f' => self.read_literal(b"alse", "false", false),
            b'n' => match self.rd.peek() {
                Some(b'u') => {
                    self.rd.get();
                    if !self.rd.expect(b"ll") {
                        return Err(self.rd.error(Reason::ExpectedLiteral("null")));
                    }
                    let null = self.builder.null();
                    self.add(Completed::Value(null))
                }
                Some(b'a') => self.read_num(c),
                _ => {
                    self.rd.get();
                    Err(self.rd.error(Reason::InvalidToken))
                }
            },
            b'/' => skip_comment(&mut self.rd),
            _ => Err(self.rd.error(Reason::UnexpectedCharacter(c))),
        }
    }

    fn read_literal(&mut self, rest: &[u8], name: &'static str, value: bool) -> Result<(), ParseError> {
        if !self.rd.expect(rest) {
            return Err(self.rd.error(Reason::ExpectedLiteral(name)));
        }
        let value = self.builder.boolean(value);
        self.add(Completed::Value(value))
    }

    fn read_num(&mut self, first: u8) -> Result<(), ParseError> {
        let mut ni = read_number(&mut self.rd, first)?;
        ni.apply_mode(self.options.number_mode);
        self.add(Completed::Number(ni))
    }

    /// Places a completed value according to the innermost frame.
    fn add(&mut self, item: Completed<'src, B::Value>) -> Result<(), ParseError> {
        let Some(frame) = self.stack.peek_mut() else {
            match item {
                Completed::Value(v) => self.builder.add_value(v),
                Completed::Number(ni) => self.builder.add_number(&ni),
                Completed::String(s, origin) => self.builder.add_string(s, origin),
            }
            self.values += 1;
            return Ok(());
        };

        match (frame.next, item) {
            (Next::ArrayNew | Next::ArrayElement, item) => {
                let array = &mut frame.value;
                match item {
                    Completed::Value(v) => self.builder.array_append_value(array, v),
                    Completed::Number(ni) => self.builder.array_append_number(array, &ni),
                    Completed::String(s, origin) => self.builder.array_append_string(array, s, origin),
                }
                frame.next = Next::ArrayComma;
            }
            (Next::ObjectNew | Next::ObjectKey, Completed::String(s, _)) => {
                let key = match s {
                    Cow::Borrowed(span) if self.rd.in_protected_region(span) => Cow::Borrowed(span),
                    s => Cow::Owned(s.into_owned()),
                };
                frame.key = Some(key);
                frame.next = Next::ObjectColon;
            }
            (Next::ObjectValue, item) => {
                let Some(key) = frame.key.take() else {
                    return Err(self.rd.error(Reason::Misplaced {
                        expected: Next::ObjectKey,
                        found: item.describe(),
                    }));
                };
                let object = &mut frame.value;
                match item {
                    Completed::Value(v) => self.builder.object_set_value(object, key, v),
                    Completed::Number(ni) => self.builder.object_set_number(object, key, &ni),
                    Completed::String(s, origin) => {
                        self.builder.object_set_string(object, key, s, origin);
                    }
                }
                frame.next = Next::ObjectComma;
            }
            (expected, item) => {
                return Err(self.rd.error(Reason::Misplaced { expected, found: item.describe() }));
            }
        }
        Ok(())
    }

    /// Rejects a container open where no value may start.
    fn check_value_position(&self, found: &'static str) -> Result<(), ParseError> {
        match self.stack.next() {
            Next::None | Next::ArrayNew | Next::ArrayElement | Next::ObjectValue => Ok(()),
            expected => Err(self.rd.error(Reason::Misplaced { expected, found })),
        }
    }

    fn array_start(&mut self) -> Result<(), ParseError> {
        self.check_value_position("an array")?;
        let array = self.builder.start_array();
        self.stack.push(Frame::array(array));
        log::trace!("array opened at depth {}", self.stack.depth());
        Ok(())
    }

    fn array_end(&mut self) -> Result<(), ParseError> {
        match self.stack.next() {
            Next::ArrayNew | Next::ArrayComma => {}
            Next::None => return Err(self.rd.error(Reason::UnexpectedClose(Container::Array))),
            expected => {
                return Err(self.rd.error(Reason::Misplaced { expected, found: "an array close" }));
            }
        }
        if let Some(mut frame) = self.stack.pop() {
            self.builder.end_array(&mut frame.value);
            log::trace!("array closed at depth {}", self.stack.depth() + 1);
            self.add(Completed::Value(frame.value))?;
        }
        Ok(())
    }

    fn object_start(&mut self) -> Result<(), ParseError> {
        self.check_value_position("an object")?;
        let object = self.builder.start_object();
        self.stack.push(Frame::object(object));
        log::trace!("object opened at depth {}", self.stack.depth());
        Ok(())
    }

    fn object_end(&mut self) -> Result<(), ParseError> {
        match self.stack.next() {
            Next::ObjectNew | Next::ObjectComma => {}
            Next::None => return Err(self.rd.error(Reason::UnexpectedClose(Container::Object))),
            expected => {
                return Err(self.rd.error(Reason::Misplaced { expected, found: "an object close" }));
            }
        }
        if let Some(mut frame) = self.stack.pop() {
            self.builder.end_object(&mut frame.value);
            log::trace!("object closed at depth {}", self.stack.depth() + 1);
            self.add(Completed::Value(frame.value))?;
        }
        Ok(())
    }

    fn comma(&mut self) -> Result<(), ParseError> {
        match self.stack.peek_mut() {
            Some(frame) if frame.next == Next::ArrayComma => frame.next = Next::ArrayElement,
            Some(frame) if frame.next == Next::ObjectComma => frame.next = Next::ObjectKey,
            _ => return Err(self.rd.error(Reason::UnexpectedComma)),
        }
        Ok(())
    }

    fn colon(&mut self) -> Result<(), ParseError> {
        match self.stack.peek_mut() {
            Some(frame) if frame.next == Next::ObjectColon => frame.next = Next::ObjectValue,
            _ => return Err(self.rd.error(Reason::UnexpectedColon)),
        }
        Ok(())
    }

    /// End of input with open containers is an error.
    fn check_terminated(&self) -> Result<(), ParseError> {
        match self.stack.next() {
            Next::None => Ok(()),
            next if next.is_array() => Err(self.rd.error(Reason::Unterminated(Container::Array))),
            _ => Err(self.rd.error(Reason::Unterminated(Container::Object))),
        }
    }
}
