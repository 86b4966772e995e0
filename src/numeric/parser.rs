// ============================================================================
// Literal Parser
// Decimal literals and native numbers into canonical block form
// ============================================================================
//
// Grouping rule:
// - integer digits are grouped in threes from the decimal point leftward
// - fractional digits are right-padded with zeros to a multiple of three and
//   grouped from the decimal point rightward
// - the exponent before canonicalization is the number of fractional blocks
//
// "7.86" -> fraction "860", integer "7" -> [860, 7] at exponent 1.

use super::block::{Block, BLOCK_DIGITS};
use super::errors::{NumericError, NumericResult};
use super::number_value::{NumberValue, Sign};
use crate::domain::config::ParserConfig;
use std::str::FromStr;

/// Parser for decimal literals.
///
/// Accepts an optional leading `-` (and `+` when configured), an integer
/// part and an optional fractional part, e.g. `"-1000"`, `"7.86"`, `".5"`.
#[derive(Debug, Clone, Default)]
pub struct LiteralParser {
    config: ParserConfig,
}

impl LiteralParser {
    /// Parser with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser with a custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a literal into its canonical value.
    ///
    /// # Errors
    /// `MalformedLiteral` for anything that is not a plain decimal literal.
    pub fn parse(&self, literal: &str) -> NumericResult<NumberValue> {
        let text = if self.config.trim_whitespace {
            literal.trim_matches(|c: char| c.is_ascii_whitespace())
        } else {
            literal
        };

        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') if self.config.allow_plus_sign => (false, &text[1..]),
            Some(b'+') => return Err(NumericError::malformed(literal, "leading plus sign")),
            _ => (false, text),
        };

        let (int_digits, frac_digits) = match unsigned.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (unsigned, ""),
        };

        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(NumericError::malformed(literal, "no digits"));
        }
        if frac_digits.contains('.') {
            return Err(NumericError::malformed(literal, "more than one decimal point"));
        }
        if !int_digits.bytes().chain(frac_digits.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(NumericError::malformed(literal, "unexpected character"));
        }
        if let Some(max) = self.config.max_digits {
            if int_digits.len() + frac_digits.len() > max {
                return Err(NumericError::malformed(literal, "too many digits"));
            }
        }

        let (blocks, exponent) = group_digits(int_digits.as_bytes(), frac_digits.as_bytes())
            .ok_or_else(|| NumericError::malformed(literal, "too many fractional digits"))?;

        let sign = if negative {
            Sign::Negative
        } else {
            Sign::Positive
        };
        // All-zero mantissas collapse to canonical zero regardless of sign
        NumberValue::make_canonical(sign, &blocks, exponent)
    }
}

/// Split validated ASCII digits into least-significant-first blocks.
///
/// Returns `None` only if the fractional block count does not fit an `i64`.
fn group_digits(int_digits: &[u8], frac_digits: &[u8]) -> Option<(Vec<Block>, i64)> {
    let frac_blocks = frac_digits.len().div_ceil(BLOCK_DIGITS);
    let int_blocks = int_digits.len().div_ceil(BLOCK_DIGITS);
    let mut blocks = Vec::with_capacity(frac_blocks + int_blocks);

    // Fraction: chunk from the decimal point, pad the last chunk on the right
    for chunk in frac_digits.chunks(BLOCK_DIGITS).rev() {
        let padding = BLOCK_DIGITS - chunk.len();
        blocks.push(digits_to_block(chunk) * 10u16.pow(padding as u32));
    }

    // Integer: chunk from the decimal point leftward
    for chunk in int_digits.rchunks(BLOCK_DIGITS) {
        blocks.push(digits_to_block(chunk));
    }

    if blocks.is_empty() {
        blocks.push(0);
    }
    Some((blocks, i64::try_from(frac_blocks).ok()?))
}

#[inline]
fn digits_to_block(digits: &[u8]) -> Block {
    digits
        .iter()
        .fold(0, |acc, &d| acc * 10 + Block::from(d - b'0'))
}

/// Parse a literal with the default parser configuration.
pub fn parse(literal: &str) -> NumericResult<NumberValue> {
    LiteralParser::new().parse(literal)
}

// ============================================================================
// Construction Entry Points
// ============================================================================

impl NumberValue {
    /// Parse a decimal literal such as `"-0.125"`.
    pub fn parse(literal: &str) -> NumericResult<Self> {
        parse(literal)
    }
}

impl FromStr for NumberValue {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl TryFrom<&str> for NumberValue {
    type Error = NumericError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        parse(s)
    }
}

impl TryFrom<String> for NumberValue {
    type Error = NumericError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        parse(&s)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for NumberValue {
                fn from(value: $t) -> Self {
                    NumberValue::from_scaled_integer(value < 0, value.unsigned_abs() as u128, 0)
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for NumberValue {
                fn from(value: $t) -> Self {
                    NumberValue::from_scaled_integer(false, value as u128, 0)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, isize);
impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

impl TryFrom<f64> for NumberValue {
    type Error = NumericError;

    /// Convert through the shortest decimal rendering that round-trips,
    /// so `1.1_f64` becomes exactly `1.1`.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let rendered = value.to_string();
        if !value.is_finite() {
            return Err(NumericError::MalformedLiteral {
                literal: rendered,
                reason: "not a finite number",
            });
        }
        parse(&rendered)
    }
}

impl TryFrom<f32> for NumberValue {
    type Error = NumericError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        let rendered = value.to_string();
        if !value.is_finite() {
            return Err(NumericError::MalformedLiteral {
                literal: rendered,
                reason: "not a finite number",
            });
        }
        parse(&rendered)
    }
}
