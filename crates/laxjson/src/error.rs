use core::{fmt, panic::Location};

use thiserror::Error;

use crate::stack::Next;

/// Broad classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A token could not be lexed: bad escape, unterminated string or
    /// comment, malformed number or literal, unexpected character.
    Lexical,
    /// Tokens were well formed but appeared where the nesting state does not
    /// allow them.
    Structural,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lexical => f.write_str("lexical"),
            ErrorKind::Structural => f.write_str("structural"),
        }
    }
}

/// Which kind of container a structural error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Array,
    Object,
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Array => f.write_str("array"),
            Container::Object => f.write_str("object"),
        }
    }
}

/// The specific rule that was violated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Reason {
    #[error("unexpected character {}", DisplayByte(*.0))]
    UnexpectedCharacter(u8),
    #[error("invalid token")]
    InvalidToken,
    #[error("expected {0}")]
    ExpectedLiteral(&'static str),
    #[error("not a number or other value")]
    InvalidNumber,
    #[error("quoted string not terminated")]
    UnterminatedString,
    #[error("invalid escaped character {}", DisplayByte(*.0))]
    InvalidEscape(u8),
    #[error("invalid hex character")]
    InvalidHex,
    #[error("invalid surrogate pair starting with \\u{0:04X}")]
    InvalidSurrogate(u32),
    #[error("invalid Unicode character {0:#X}")]
    InvalidUnicode(u32),
    #[error("invalid comment format")]
    InvalidComment,
    #[error("comment not terminated")]
    UnterminatedComment,

    #[error("unexpected comma")]
    UnexpectedComma,
    #[error("unexpected colon")]
    UnexpectedColon,
    #[error("unexpected {0} close")]
    UnexpectedClose(Container),
    #[error("expected {expected}, not {found}")]
    Misplaced { expected: Next, found: &'static str },
    #[error("{0} not terminated")]
    Unterminated(Container),
    #[error("unexpected data after top-level value")]
    TrailingData,
    #[error("no value found")]
    NoValue,
}

impl Reason {
    /// Classifies the reason as a lexical or structural failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Reason::UnexpectedCharacter(_)
            | Reason::InvalidToken
            | Reason::ExpectedLiteral(_)
            | Reason::InvalidNumber
            | Reason::UnterminatedString
            | Reason::InvalidEscape(_)
            | Reason::InvalidHex
            | Reason::InvalidSurrogate(_)
            | Reason::InvalidUnicode(_)
            | Reason::InvalidComment
            | Reason::UnterminatedComment => ErrorKind::Lexical,
            Reason::UnexpectedComma
            | Reason::UnexpectedColon
            | Reason::UnexpectedClose(_)
            | Reason::Misplaced { .. }
            | Reason::Unterminated(_)
            | Reason::TrailingData
            | Reason::NoValue => ErrorKind::Structural,
        }
    }
}

/// The single error a parse can produce.
///
/// `line`, `column` and `offset` point into the input at the place the error
/// was detected. `location` is the source location of the check that
/// rejected the input, which is useful when debugging the parser itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} error: {reason} at line {line}, column {column}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub reason: Reason,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub location: &'static Location<'static>,
}

impl ParseError {
    #[track_caller]
    pub(crate) fn new(reason: Reason, offset: usize, line: usize, column: usize) -> Self {
        Self {
            kind: reason.kind(),
            reason,
            offset,
            line,
            column,
            location: Location::caller(),
        }
    }

    #[must_use]
    pub fn is_lexical(&self) -> bool {
        self.kind == ErrorKind::Lexical
    }

    #[must_use]
    pub fn is_structural(&self) -> bool {
        self.kind == ErrorKind::Structural
    }
}

struct DisplayByte(u8);

impl fmt::Display for DisplayByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_ascii_graphic() || self.0 == b' ' {
            write!(f, "'{}'", self.0 as char)
        } else {
            write!(f, "0x{:02X}", self.0)
        }
    }
}
