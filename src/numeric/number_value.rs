// ============================================================================
// Number Value
// Immutable canonical (sign, mantissa, exponent) snapshot of a decimal
// ============================================================================

use super::block::{is_valid_block, Block, BLOCK_BASE, BLOCK_DIGITS};
use super::errors::{NumericError, NumericResult};
use std::ops::Neg;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Sign
// ============================================================================

/// Sign of a value. Zero has its own sign so that canonical zero is unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i8)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i8", into = "i8"))]
pub enum Sign {
    Negative = -1,
    Zero = 0,
    Positive = 1,
}

impl Sign {
    /// The sign as `-1`, `0` or `1`.
    #[inline]
    pub const fn as_i8(self) -> i8 {
        self as i8
    }

    /// Mirror the sign; zero stays zero.
    #[inline]
    pub const fn negate(self) -> Self {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}

impl TryFrom<i8> for Sign {
    type Error = NumericError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Sign::Negative),
            0 => Ok(Sign::Zero),
            1 => Ok(Sign::Positive),
            _ => Err(NumericError::InvariantViolation("sign must be -1, 0 or 1")),
        }
    }
}

impl From<Sign> for i8 {
    fn from(sign: Sign) -> Self {
        sign.as_i8()
    }
}

// ============================================================================
// Number Value
// ============================================================================

/// Arbitrary-precision decimal in canonical base-1000 form.
///
/// The value is `sign × Σ mantissa[i]·1000^i × 1000^(−exponent)`, with the
/// mantissa stored least-significant block first. Every instance is
/// canonical:
/// - the mantissa is never empty and has no zero block at either end,
///   except for the singleton `[0]`
/// - zero is exactly `(Zero, [0], 0)`
///
/// so two values are numerically equal iff they are structurally equal.
/// Blocks are shared behind an `Arc`; cloning never copies them.
///
/// # Example
/// ```
/// use blockdec::numeric::{NumberValue, Sign};
///
/// let x: NumberValue = "7.86".parse().unwrap();
/// assert_eq!(x.sign(), Sign::Positive);
/// assert_eq!(x.mantissa(), &[860, 7]);
/// assert_eq!(x.exponent(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawNumberValue"))]
pub struct NumberValue {
    sign: Sign,
    mantissa: Arc<[Block]>,
    exponent: i64,
}

impl NumberValue {
    /// Canonical zero: `(Zero, [0], 0)`.
    pub fn zero() -> Self {
        Self {
            sign: Sign::Zero,
            mantissa: Arc::from([0 as Block]),
            exponent: 0,
        }
    }

    /// Build a canonical value from an arbitrary triple.
    ///
    /// Redundant zero blocks are stripped from both ends; each
    /// least-significant block removed lowers the exponent by one so the
    /// value is preserved. A zero mantissa always becomes canonical zero.
    ///
    /// # Errors
    /// `InvariantViolation` if the mantissa is empty, holds a block above 999,
    /// or is non-zero while `sign` is `Zero`.
    pub fn make_canonical(sign: Sign, mantissa: &[Block], exponent: i64) -> NumericResult<Self> {
        if mantissa.is_empty() {
            return Err(NumericError::InvariantViolation("mantissa is empty"));
        }
        if !mantissa.iter().all(|&b| is_valid_block(b)) {
            return Err(NumericError::InvariantViolation("block outside [0, 999]"));
        }

        let Some(high) = mantissa.iter().rposition(|&b| b != 0) else {
            return Ok(Self::zero());
        };
        if sign == Sign::Zero {
            return Err(NumericError::InvariantViolation(
                "non-zero mantissa with zero sign",
            ));
        }
        // `high` exists, so there is a lowest non-zero block too
        let low = mantissa.iter().position(|&b| b != 0).unwrap_or(high);

        let exponent = i64::try_from(low)
            .ok()
            .and_then(|stripped| exponent.checked_sub(stripped))
            .ok_or(NumericError::InvariantViolation("exponent underflow"))?;

        Ok(Self {
            sign,
            mantissa: Arc::from(&mantissa[low..=high]),
            exponent,
        })
    }

    /// Build from a raw `(sign, mantissa, exponent)` triple with an integer
    /// sign, canonicalizing it.
    pub fn from_raw_parts(sign: i8, mantissa: &[Block], exponent: i64) -> NumericResult<Self> {
        Self::make_canonical(Sign::try_from(sign)?, mantissa, exponent)
    }

    /// Exact value of `magnitude × 1000^(−exponent)` with the given sign.
    ///
    /// `exponent` must be small (native-number conversions only use 0..=10),
    /// so stripping trailing blocks can never overflow it.
    pub(crate) fn from_scaled_integer(negative: bool, magnitude: u128, exponent: i64) -> Self {
        if magnitude == 0 {
            return Self::zero();
        }

        let mut rest = magnitude;
        let mut exponent = exponent;
        while rest % u128::from(BLOCK_BASE) == 0 {
            rest /= u128::from(BLOCK_BASE);
            exponent -= 1;
        }

        let mut blocks = Vec::new();
        while rest > 0 {
            blocks.push((rest % u128::from(BLOCK_BASE)) as Block);
            rest /= u128::from(BLOCK_BASE);
        }

        Self {
            sign: if negative { Sign::Negative } else { Sign::Positive },
            mantissa: Arc::from(blocks),
            exponent,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Blocks, least-significant first.
    #[inline]
    pub fn mantissa(&self) -> &[Block] {
        &self.mantissa
    }

    #[inline]
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign == Sign::Zero
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.sign == Sign::Positive
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Negative
    }

    /// Same magnitude, mirrored sign. Shares the mantissa.
    pub fn negate(&self) -> Self {
        Self {
            sign: self.sign.negate(),
            mantissa: Arc::clone(&self.mantissa),
            exponent: self.exponent,
        }
    }

    /// Same magnitude, non-negative sign.
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            self.negate()
        } else {
            self.clone()
        }
    }

    /// Decompose into `(sign, blocks, exponent)`.
    pub fn into_parts(self) -> (i8, Vec<Block>, i64) {
        (self.sign.as_i8(), self.mantissa.to_vec(), self.exponent)
    }
}

impl Default for NumberValue {
    fn default() -> Self {
        Self::zero()
    }
}

impl Neg for NumberValue {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for &NumberValue {
    type Output = NumberValue;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

// ============================================================================
// Conversion to and from rust_decimal (for API boundaries)
// ============================================================================

impl From<rust_decimal::Decimal> for NumberValue {
    /// Exact conversion; every `Decimal` fits a block mantissa.
    fn from(d: rust_decimal::Decimal) -> Self {
        let scale = d.scale();
        let pad = (BLOCK_DIGITS as u32 - scale % BLOCK_DIGITS as u32) % BLOCK_DIGITS as u32;
        // |mantissa| < 2^96, so two extra decimal digits cannot overflow u128
        let magnitude = d.mantissa().unsigned_abs() * 10u128.pow(pad);
        let exponent = i64::from((scale + pad) / BLOCK_DIGITS as u32);
        Self::from_scaled_integer(d.is_sign_negative(), magnitude, exponent)
    }
}

impl NumberValue {
    /// Largest scale `rust_decimal` supports.
    const DECIMAL_MAX_SCALE: u32 = 28;

    /// Convert to `rust_decimal::Decimal`.
    ///
    /// Intended for interop and cross-checking; the result is normalized.
    ///
    /// # Errors
    /// `PrecisionLoss` if the value needs more than 28 fractional digits or
    /// more than 96 bits of mantissa.
    pub fn to_decimal(&self) -> NumericResult<rust_decimal::Decimal> {
        let mut integer: i128 = 0;
        for &block in self.mantissa.iter().rev() {
            integer = integer
                .checked_mul(i128::from(BLOCK_BASE))
                .and_then(|v| v.checked_add(i128::from(block)))
                .ok_or(NumericError::PrecisionLoss)?;
        }

        let mut scale: u64 = 0;
        if self.exponent >= 0 {
            scale = (self.exponent as u64)
                .checked_mul(BLOCK_DIGITS as u64)
                .ok_or(NumericError::PrecisionLoss)?;
            while scale > u64::from(Self::DECIMAL_MAX_SCALE) && integer % 10 == 0 {
                integer /= 10;
                scale -= 1;
            }
        } else {
            for _ in 0..self.exponent.unsigned_abs() {
                integer = integer
                    .checked_mul(i128::from(BLOCK_BASE))
                    .ok_or(NumericError::PrecisionLoss)?;
            }
        }
        let scale = u32::try_from(scale).map_err(|_| NumericError::PrecisionLoss)?;

        if self.is_negative() {
            integer = -integer;
        }
        rust_decimal::Decimal::try_from_i128_with_scale(integer, scale)
            .map(|d| d.normalize())
            .map_err(|_| NumericError::PrecisionLoss)
    }
}

// ============================================================================
// Serde Interchange
// ============================================================================

/// Wire form of a value; deserialization re-validates canonical form.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawNumberValue {
    sign: i8,
    mantissa: Vec<Block>,
    exponent: i64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawNumberValue> for NumberValue {
    type Error = NumericError;

    fn try_from(raw: RawNumberValue) -> Result<Self, Self::Error> {
        let value = Self::from_raw_parts(raw.sign, &raw.mantissa, raw.exponent)?;
        if value.sign.as_i8() != raw.sign
            || *value.mantissa != raw.mantissa[..]
            || value.exponent != raw.exponent
        {
            return Err(NumericError::InvariantViolation("triple is not canonical"));
        }
        Ok(value)
    }
}

// ============================================================================
// Tests
// ============================================================================
