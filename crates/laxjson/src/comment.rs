//! Comment skipping.
//!
//! Comments may appear between any two tokens and never reach the builder.
//! A `/` in token position must start either a `/* block */` or a `// line`
//! comment; anything else after it is an error.

use crate::{
    error::{ParseError, Reason},
    reader::Reader,
};

/// Skips a comment whose leading `/` has already been consumed.
///
/// Block comments run to the first `*/`; line comments to the end of the
/// line or of the input.
pub(crate) fn skip_comment(rd: &mut Reader<'_>) -> Result<(), ParseError> {
    match rd.get() {
        Some(b'*') => loop {
            match rd.get() {
                Some(b'*') => {
                    while rd.peek() == Some(b'*') {
                        rd.get();
                    }
                    if rd.get() == Some(b'/') {
                        return Ok(());
                    }
                }
                Some(_) => {}
                None => break,
            }
        },
        Some(b'/') => loop {
            match rd.get() {
                Some(b'\n' | b'\r' | b'\x0c') | None => return Ok(()),
                Some(_) => {}
            }
        },
        _ => return Err(rd.error(Reason::InvalidComment)),
    }
    Err(rd.error(Reason::UnterminatedComment))
}
