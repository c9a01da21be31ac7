//! Quoted string decoding.
//!
//! Strings without escapes are returned as a borrowed span of the input.
//! The first backslash switches to an owned buffer that receives the prefix
//! read so far and every decoded byte after it.

use alloc::{borrow::Cow, vec::Vec};

use bstr::{BStr, ByteSlice};

use crate::{
    builder::Span,
    error::{ParseError, Reason},
    reader::Reader,
};

/// Reads a string whose opening quote has already been consumed.
///
/// Returns the decoded contents and the span of the literal between the
/// quotes.
pub(crate) fn read_string<'src>(
    rd: &mut Reader<'src>,
) -> Result<(Cow<'src, BStr>, Span), ParseError> {
    rd.protect();
    let result = loop {
        match rd.peek() {
            None => break Err(rd.error(Reason::UnterminatedString)),
            Some(b'"') => {
                let s = rd.protected();
                let origin = Span { start: rd.mark(), len: s.len() };
                rd.get();
                break Ok((Cow::Borrowed(s.as_bstr()), origin));
            }
            Some(b'\\') => {
                break read_escaped(rd).map(|(buf, origin)| (Cow::Owned(buf.into()), origin));
            }
            Some(_) => {
                rd.get();
            }
        }
    };
    rd.reset();
    result
}

// Entered at the first backslash, with the protected mark at the start of
// the literal.
fn read_escaped(rd: &mut Reader<'_>) -> Result<(Vec<u8>, Span), ParseError> {
    let mut buf = rd.protected().to_vec();
    loop {
        match rd.get() {
            None => return Err(rd.error(Reason::UnterminatedString)),
            Some(b'"') => break,
            Some(b'\\') => match rd.get() {
                Some(b'n') => buf.push(b'\n'),
                Some(b'r') => buf.push(b'\r'),
                Some(b't') => buf.push(b'\t'),
                Some(b'f') => buf.push(b'\x0c'),
                Some(b'b') => buf.push(b'\x08'),
                Some(b'"') => buf.push(b'"'),
                Some(b'/') => buf.push(b'/'),
                Some(b'\\') => buf.push(b'\\'),
                Some(b'u') => {
                    let code = read_code_point(rd)?;
                    encode_utf8(code, &mut buf).map_err(|reason| rd.error(reason))?;
                }
                Some(c) => return Err(rd.error(Reason::InvalidEscape(c))),
                None => return Err(rd.error(Reason::UnterminatedString)),
            },
            Some(c) => buf.push(c),
        }
    }
    let start = rd.mark();
    let origin = Span { start, len: rd.offset() - 1 - start };
    Ok((buf, origin))
}

// Entered after `\u`. Combines a high surrogate with the `\uXXXX` low
// surrogate that must follow it.
fn read_code_point(rd: &mut Reader<'_>) -> Result<u32, ParseError> {
    let code = read_hex(rd)?;
    match code {
        0xD800..=0xDBFF => {
            if !(rd.get() == Some(b'\\') && rd.get() == Some(b'u')) {
                return Err(rd.error(Reason::InvalidSurrogate(code)));
            }
            let low = read_hex(rd)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(rd.error(Reason::InvalidSurrogate(code)));
            }
            Ok((((code - 0xD800) << 10) | (low - 0xDC00)) + 0x1_0000)
        }
        0xDC00..=0xDFFF => Err(rd.error(Reason::InvalidSurrogate(code))),
        _ => Ok(code),
    }
}

fn read_hex(rd: &mut Reader<'_>) -> Result<u32, ParseError> {
    let mut code = 0;
    for _ in 0..4 {
        let digit = match rd.get() {
            Some(c @ b'0'..=b'9') => c - b'0',
            Some(c @ b'a'..=b'f') => c - b'a' + 10,
            Some(c @ b'A'..=b'F') => c - b'A' + 10,
            Some(_) => return Err(rd.error(Reason::InvalidHex)),
            None => return Err(rd.error(Reason::UnterminatedString)),
        };
        code = (code << 4) | u32::from(digit);
    }
    Ok(code)
}

/// Appends `code` to `out` in UTF-8.
///
/// Code points beyond U+10FFFF use the original 5 and 6 byte forms of
/// UTF-8, so anything up to `0x7FFF_FFFF` is encodable.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn encode_utf8(code: u32, out: &mut Vec<u8>) -> Result<(), Reason> {
    let (len, lead) = match code {
        0..=0x7F => {
            out.push(code as u8);
            return Ok(());
        }
        0x80..=0x7FF => (2, 0xC0),
        0x800..=0xFFFF => (3, 0xE0),
        0x1_0000..=0x1F_FFFF => (4, 0xF0),
        0x20_0000..=0x3FF_FFFF => (5, 0xF8),
        0x400_0000..=0x7FFF_FFFF => (6, 0xFC),
        _ => return Err(Reason::InvalidUnicode(code)),
    };
    let shift = 6 * (len - 1);
    out.push(lead | (code >> shift) as u8);
    for i in (0..len - 1).rev() {
        out.push(0x80 | ((code >> (6 * i)) & 0x3F) as u8);
    }
    Ok(())
}
