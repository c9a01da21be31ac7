//! Numeric literal lexing and reconstruction.
//!
//! The lexer accumulates the integer part, the fractional part and the
//! exponent into fixed-width integers while they are exact. As soon as a
//! literal needs more than [`MAX_SIGNIFICANT_DIGITS`] significant digits, or
//! would overflow an `i64`, or has an exponent of [`MAX_EXPONENT`] or more, it
//! is flagged [`large`](NumberInfo::large) and the raw literal text becomes
//! the source of truth.

use alloc::string::String;
use core::fmt;

use bstr::{BStr, ByteSlice};
use num_bigint::BigInt;

use crate::{
    error::{ParseError, Reason},
    options::NumberMode,
    reader::Reader,
};

/// Significant decimal digits that are still reconstructed exactly.
pub const MAX_SIGNIFICANT_DIGITS: u32 = 14;

/// Exponent magnitude at which a literal is always treated as large.
pub const MAX_EXPONENT: i32 = 1023;

/// Intermediate representation of a lexed numeric literal.
///
/// When [`large`](Self::large) is unset the value is exactly
/// `(int + frac / div) * 10^exp`, negated if [`negative`](Self::negative).
/// When it is set, [`raw`](Self::raw) holds the literal unchanged so an
/// arbitrary-precision value can be derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberInfo<'src> {
    /// The literal as it appears in the input, sign included.
    pub raw: &'src [u8],
    /// Offset of the literal in the input.
    pub start: usize,
    /// Integer part magnitude.
    pub int: i64,
    /// Fractional part numerator.
    pub frac: i64,
    /// Fractional part denominator, a power of ten.
    pub div: i64,
    pub exp: i32,
    /// Significant decimal digits, excluding a trailing run of zeros.
    pub digits: u32,
    pub large: bool,
    pub negative: bool,
    pub infinity: bool,
    pub nan: bool,
    /// Set by [`NumberMode::FloatOnOverflow`]: large fractional literals
    /// become `f64` instead of exact decimals.
    pub degrade_to_float: bool,
}

impl<'src> NumberInfo<'src> {
    fn new(start: usize) -> Self {
        Self {
            raw: &[],
            start,
            int: 0,
            frac: 0,
            div: 1,
            exp: 0,
            digits: 0,
            large: false,
            negative: false,
            infinity: false,
            nan: false,
            degrade_to_float: false,
        }
    }

    /// The raw literal text.
    #[must_use]
    pub fn raw_str(&self) -> &'src BStr {
        self.raw.as_bstr()
    }

    /// Whether the literal has neither a fractional part nor an exponent.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        !self.infinity
            && !self.nan
            && !self.raw.iter().any(|b| matches!(b, b'.' | b'e' | b'E'))
    }

    pub(crate) fn apply_mode(&mut self, mode: NumberMode) {
        match mode {
            NumberMode::ExactDecimal => {}
            NumberMode::FloatOnOverflow => self.degrade_to_float = true,
            NumberMode::AlwaysDecimal => {
                if !self.infinity && !self.nan {
                    self.large = true;
                }
            }
        }
    }

    /// Turns the literal into a concrete number.
    ///
    /// | literal                   | not large | large                         |
    /// |---------------------------|-----------|-------------------------------|
    /// | integer                   | `Int`     | `BigInt`                      |
    /// | fraction and/or exponent  | `Float`   | `Decimal` (or `Float` when degrading) |
    ///
    /// `Infinity` and `NaN` are always `Float`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_number(&self) -> Number {
        if self.infinity {
            return Number::Float(if self.negative { f64::NEG_INFINITY } else { f64::INFINITY });
        }
        if self.nan {
            return Number::Float(f64::NAN);
        }
        if self.is_integer() {
            if self.large {
                return BigInt::parse_bytes(self.raw, 10)
                    .map_or_else(|| Number::Decimal(self.text()), Number::BigInt);
            }
            return Number::Int(if self.negative { -self.int } else { self.int });
        }
        if self.large {
            if self.degrade_to_float {
                return Number::Float(self.text().parse().unwrap_or(f64::NAN));
            }
            return Number::Decimal(self.text());
        }

        let mut d = self.int as f64 + self.frac as f64 / self.div as f64;
        if self.negative {
            d = -d;
        }
        if self.exp != 0 {
            let scale: f64 = num_traits::pow(10.0, self.exp.unsigned_abs() as usize);
            if self.exp > 0 {
                d *= scale;
            } else {
                d /= scale;
            }
        }
        Number::Float(d)
    }

    fn text(&self) -> String {
        self.raw.to_str_lossy().into_owned()
    }

    fn push_int_digit(&mut self, d: u8, zeros: &mut u32) {
        self.count_digit(d, zeros);
        if self.large {
            return;
        }
        match self.int.checked_mul(10).and_then(|i| i.checked_add(i64::from(d))) {
            Some(i) if i < i64::MAX => self.int = i,
            _ => self.large = true,
        }
        self.check_precision(*zeros);
    }

    fn push_frac_digit(&mut self, d: u8, zeros: &mut u32) {
        self.count_digit(d, zeros);
        if self.large {
            return;
        }
        let frac = self.frac.checked_mul(10).and_then(|n| n.checked_add(i64::from(d)));
        match (frac, self.div.checked_mul(10)) {
            (Some(frac), Some(div)) if div < i64::MAX => {
                self.frac = frac;
                self.div = div;
            }
            _ => self.large = true,
        }
        self.check_precision(*zeros);
    }

    fn count_digit(&mut self, d: u8, zeros: &mut u32) {
        self.digits += 1;
        if d == 0 {
            *zeros += 1;
        } else {
            *zeros = 0;
        }
    }

    fn check_precision(&mut self, zeros: u32) {
        if self.digits - zeros > MAX_SIGNIFICANT_DIGITS {
            self.large = true;
        }
    }
}

/// A number produced from a [`NumberInfo`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// Exact fixed-width integer.
    Int(i64),
    /// Arbitrarily large integer.
    BigInt(BigInt),
    /// Floating-point number, including the infinities and NaN.
    Float(f64),
    /// Exact decimal, kept as its literal text.
    Decimal(String),
}

impl Number {
    /// Approximates the number as `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        use num_traits::ToPrimitive;
        match self {
            Number::Int(i) => *i as f64,
            Number::BigInt(i) => i.to_f64().unwrap_or(f64::NAN),
            Number::Float(f) => *f,
            Number::Decimal(s) => s.parse().unwrap_or(f64::NAN),
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        use num_traits::ToPrimitive;
        match self {
            Number::Int(i) => Some(*i),
            Number::BigInt(i) => i.to_i64(),
            _ => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::BigInt(i) => write!(f, "{i}"),
            Number::Float(x) if x.is_nan() => f.write_str("NaN"),
            Number::Float(x) if x.is_infinite() => {
                f.write_str(if *x < 0.0 { "-Infinity" } else { "Infinity" })
            }
            Number::Float(x) => write!(f, "{x:?}"),
            Number::Decimal(s) => f.write_str(s),
        }
    }
}

/// Lexes a numeric literal whose first byte (`+`, `-`, a digit, `I` or `N`)
/// has already been consumed.
pub(crate) fn read_number<'src>(
    rd: &mut Reader<'src>,
    first: u8,
) -> Result<NumberInfo<'src>, ParseError> {
    rd.protect_last();
    let mut ni = NumberInfo::new(rd.mark());

    let lead = match first {
        b'-' => {
            ni.negative = true;
            rd.get()
        }
        b'+' => rd.get(),
        b => Some(b),
    };
    match lead {
        Some(b'I') => {
            if !rd.expect(b"nfinity") {
                return Err(rd.error(Reason::InvalidNumber));
            }
            ni.infinity = true;
        }
        Some(b'N' | b'n') => {
            if !(rd.expect(b"a") && matches!(rd.get(), Some(b'N' | b'n'))) {
                return Err(rd.error(Reason::InvalidNumber));
            }
            ni.nan = true;
        }
        Some(d @ b'0'..=b'9') => read_decimal(rd, &mut ni, d)?,
        _ => return Err(rd.error(Reason::InvalidNumber)),
    }

    ni.raw = rd.protected();
    rd.reset();
    if ni.large {
        log::trace!("number {} exceeds fixed-width precision", ni.raw_str());
    }
    Ok(ni)
}

fn read_decimal(rd: &mut Reader<'_>, ni: &mut NumberInfo<'_>, first: u8) -> Result<(), ParseError> {
    let mut zeros = 0;

    ni.push_int_digit(first - b'0', &mut zeros);
    while let Some(c @ b'0'..=b'9') = rd.peek() {
        rd.get();
        ni.push_int_digit(c - b'0', &mut zeros);
    }

    if rd.peek() == Some(b'.') {
        rd.get();
        if !matches!(rd.peek(), Some(b'0'..=b'9')) {
            return Err(rd.error(Reason::InvalidNumber));
        }
        while let Some(c @ b'0'..=b'9') = rd.peek() {
            rd.get();
            ni.push_frac_digit(c - b'0', &mut zeros);
        }
    }

    if matches!(rd.peek(), Some(b'e' | b'E')) {
        rd.get();
        let negative = match rd.peek() {
            Some(b'-') => {
                rd.get();
                true
            }
            Some(b'+') => {
                rd.get();
                false
            }
            _ => false,
        };
        if !matches!(rd.peek(), Some(b'0'..=b'9')) {
            return Err(rd.error(Reason::InvalidNumber));
        }
        while let Some(c @ b'0'..=b'9') = rd.peek() {
            rd.get();
            ni.exp = ni.exp.saturating_mul(10).saturating_add(i32::from(c - b'0'));
            if ni.exp >= MAX_EXPONENT {
                ni.large = true;
            }
        }
        if negative {
            ni.exp = -ni.exp;
        }
    }

    ni.digits -= zeros;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]

    use alloc::string::ToString;

    use rstest::rstest;

    use super::*;

    fn lex(input: &str) -> NumberInfo<'_> {
        let mut rd = Reader::new(input.as_bytes());
        let first = rd.get().unwrap();
        let ni = read_number(&mut rd, first).unwrap();
        assert_eq!(rd.peek(), None, "literal {input:?} not fully consumed");
        ni
    }

    #[test]
    fn simple_integer() {
        let ni = lex("12345");
        assert_eq!(ni.int, 12345);
        assert_eq!(ni.digits, 5);
        assert!(!ni.large);
        assert_eq!(ni.raw, b"12345");
        assert_eq!(ni.to_number(), Number::Int(12345));
    }

    #[test]
    fn signs() {
        assert_eq!(lex("-42").to_number(), Number::Int(-42));
        assert_eq!(lex("+42").to_number(), Number::Int(42));
        assert_eq!(lex("+42").raw, b"+42");
    }

    #[test]
    fn fraction_and_exponent() {
        let ni = lex("3.25e2");
        assert_eq!((ni.int, ni.frac, ni.div, ni.exp), (3, 25, 100, 2));
        assert_eq!(ni.to_number(), Number::Float(325.0));

        let ni = lex("-1.5E-3");
        assert_eq!(ni.exp, -3);
        assert!(ni.negative);
        let Number::Float(x) = ni.to_number() else { panic!("expected float") };
        assert!((x + 0.0015).abs() < 1e-15);
    }

    #[test]
    fn trailing_zeros_do_not_count() {
        let ni = lex("12345678901234000");
        assert_eq!(ni.digits, 14);
        assert!(!ni.large);
        assert_eq!(ni.to_number(), Number::Int(12_345_678_901_234_000));
    }

    #[test]
    fn fifteen_significant_digits_are_large() {
        let ni = lex("123456789012345");
        assert!(ni.large);
        assert_eq!(ni.to_number(), Number::BigInt(BigInt::from(123_456_789_012_345_i64)));
    }

    #[test]
    fn overflow_is_large() {
        let ni = lex("100000000000000000000000");
        assert!(ni.large);
        assert_eq!(ni.raw, b"100000000000000000000000");
        assert_eq!(ni.to_number().to_string(), "100000000000000000000000");
    }

    #[test]
    fn zero_run_carries_across_point() {
        let ni = lex("1.000000000000000000000");
        assert_eq!(ni.digits, 1);
        // The denominator overflows even though only one digit is significant.
        assert!(ni.large);
        assert_eq!(ni.to_number(), Number::Decimal("1.000000000000000000000".into()));
    }

    #[test]
    fn large_fraction_is_decimal() {
        let ni = lex("-0.12345678901234567");
        assert!(ni.large);
        assert_eq!(ni.to_number(), Number::Decimal("-0.12345678901234567".into()));
    }

    #[test]
    fn large_exponent() {
        assert!(lex("1e1023").large);
        assert!(!lex("1e1022").large);
        assert!(lex("1e-5000").large);
    }

    #[test]
    fn degrade_to_float() {
        let mut ni = lex("0.12345678901234567");
        ni.apply_mode(NumberMode::FloatOnOverflow);
        assert_eq!(ni.to_number(), Number::Float(0.123_456_789_012_345_67));

        let mut ni = lex("123456789012345678901234567890");
        ni.apply_mode(NumberMode::FloatOnOverflow);
        assert!(matches!(ni.to_number(), Number::BigInt(_)));
    }

    #[test]
    fn always_decimal() {
        let mut ni = lex("1.5");
        ni.apply_mode(NumberMode::AlwaysDecimal);
        assert_eq!(ni.to_number(), Number::Decimal("1.5".into()));

        let mut ni = lex("7");
        ni.apply_mode(NumberMode::AlwaysDecimal);
        assert_eq!(ni.to_number(), Number::BigInt(BigInt::from(7)));

        let mut ni = lex("-Infinity");
        ni.apply_mode(NumberMode::AlwaysDecimal);
        assert_eq!(ni.to_number(), Number::Float(f64::NEG_INFINITY));
    }

    #[test]
    fn infinity_and_nan() {
        assert_eq!(lex("Infinity").to_number(), Number::Float(f64::INFINITY));
        assert_eq!(lex("-Infinity").to_number(), Number::Float(f64::NEG_INFINITY));
        assert_eq!(lex("+Infinity").to_number(), Number::Float(f64::INFINITY));
        for nan in ["NaN", "Nan", "-NaN", "nan"] {
            let Number::Float(x) = lex(nan).to_number() else { panic!("expected float") };
            assert!(x.is_nan(), "{nan}");
        }
    }

    #[test]
    fn stops_at_delimiter() {
        let mut rd = Reader::new(b"12,3");
        let first = rd.get().unwrap();
        let ni = read_number(&mut rd, first).unwrap();
        assert_eq!(ni.raw, b"12");
        assert_eq!(rd.peek(), Some(b','));
    }

    #[rstest]
    #[case("-")]
    #[case("+")]
    #[case("1.")]
    #[case("1.e5")]
    #[case("1e")]
    #[case("1e+")]
    #[case("Infinit")]
    #[case("-Inf")]
    #[case("NaX")]
    #[case("-x")]
    fn malformed(#[case] input: &str) {
        let mut rd = Reader::new(input.as_bytes());
        let first = rd.get().unwrap();
        let err = read_number(&mut rd, first).unwrap_err();
        assert_eq!(err.reason, Reason::InvalidNumber);
        assert!(err.is_lexical());
    }

    #[test]
    fn display_round_trips_through_the_grammar() {
        assert_eq!(Number::Float(1.0).to_string(), "1.0");
        assert_eq!(Number::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Number::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Number::Decimal("1.50".into()).to_string(), "1.50");
    }
}
