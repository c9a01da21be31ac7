/// How numeric literals are turned into values.
///
/// The lexer always records whether a literal fits fixed-width arithmetic
/// (see [`NumberInfo::large`](crate::NumberInfo::large)); the mode decides
/// what happens to the ones that do not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberMode {
    /// Literals that exceed fixed-width precision become arbitrary-precision
    /// integers or exact decimals.
    #[default]
    ExactDecimal,
    /// Like [`NumberMode::ExactDecimal`], but fractional or exponent
    /// literals that exceed fixed-width precision degrade to `f64`.
    /// Oversized integers still become arbitrary-precision integers.
    FloatOnOverflow,
    /// Every finite literal is treated as exceeding fixed-width precision, so
    /// integers become arbitrary-precision integers and everything else an
    /// exact decimal.
    AlwaysDecimal,
}

/// Configuration options for the parser.
///
/// # Examples
///
/// ```rust
/// use laxjson::{NumberMode, ParserOptions};
///
/// let options = ParserOptions {
///     allow_multiple_values: true,
///     number_mode: NumberMode::FloatOnOverflow,
/// };
/// let values = laxjson::parse_many(b"1 2.5 [3]", options).unwrap();
/// assert_eq!(values.len(), 3);
/// ```
///
/// # Default
///
/// Exact decimals, a single top-level value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Policy for numbers that do not fit fixed-width arithmetic.
    ///
    /// # Default
    ///
    /// [`NumberMode::ExactDecimal`]
    pub number_mode: NumberMode,

    /// Whether to parse multiple top-level values from a single input.
    ///
    /// When `true`, every complete top-level value is handed to the
    /// builder's top-level sink in order. This supports formats such as
    /// JSON Lines and arbitrary concatenation of values:
    ///
    /// ```json
    /// {}{}{}
    /// ```
    ///
    /// ```json
    /// 123 45 678 9
    /// ```
    ///
    /// When `false`, anything other than whitespace or comments after the
    /// first complete value is an error.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_values: bool,
}
