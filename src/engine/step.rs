// ============================================================================
// Binary Step
// One addition or subtraction between two canonical values
// ============================================================================
//
// Subtraction is addition of the negated right operand, so only two cases
// exist: operands of the same sign (or a zero operand) add magnitudes,
// operands of opposite sign subtract the lesser magnitude from the greater.

use crate::domain::Operator;
use crate::numeric::block::{
    add_magnitudes, align, aligned_width, compare_magnitude, sub_magnitudes,
};
use crate::numeric::{NumberValue, NumericError, NumericResult, Sign};
use std::cmp::Ordering;

/// Apply `operator` to two evaluated operands.
///
/// `max_blocks` bounds the aligned mantissa width; it is checked before any
/// block is allocated.
pub fn apply(
    operator: Operator,
    left: &NumberValue,
    right: &NumberValue,
    max_blocks: Option<usize>,
) -> NumericResult<NumberValue> {
    match operator {
        Operator::Add => add(left, right, max_blocks),
        Operator::Subtract => add(left, &right.negate(), max_blocks),
    }
}

/// Exact sum of two canonical values.
pub fn add(
    a: &NumberValue,
    b: &NumberValue,
    max_blocks: Option<usize>,
) -> NumericResult<NumberValue> {
    if let Some(limit) = max_blocks {
        let width = aligned_width(
            a.mantissa().len(),
            a.exponent(),
            b.mantissa().len(),
            b.exponent(),
        )?;
        if width > limit {
            return Err(NumericError::LimitExceeded {
                limit: "max_blocks",
                value: width,
            });
        }
    }

    let aligned = align(a.mantissa(), a.exponent(), b.mantissa(), b.exponent())?;

    let (sign, blocks) = if a.is_zero() || b.is_zero() || a.sign() == b.sign() {
        let sign = if a.is_zero() { b.sign() } else { a.sign() };
        (sign, add_magnitudes(&aligned.left, &aligned.right))
    } else {
        match compare_magnitude(&aligned.left, &aligned.right) {
            Ordering::Greater => (a.sign(), sub_magnitudes(&aligned.left, &aligned.right)?),
            Ordering::Less => (b.sign(), sub_magnitudes(&aligned.right, &aligned.left)?),
            Ordering::Equal => return Ok(NumberValue::zero()),
        }
    };

    debug_assert!(sign != Sign::Zero || blocks.iter().all(|&b| b == 0));
    NumberValue::make_canonical(sign, &blocks, aligned.exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(literal: &str) -> NumberValue {
        NumberValue::parse(literal).unwrap()
    }

    fn sum(a: &str, b: &str) -> (i8, Vec<u16>, i64) {
        add(&v(a), &v(b), None).unwrap().into_parts()
    }

    #[test]
    fn test_same_sign_carry() {
        assert_eq!(sum("1", "999"), (1, vec![1], -1));
        assert_eq!(sum("-1", "-999"), (-1, vec![1], -1));
        assert_eq!(sum("1", "1000"), (1, vec![1, 1], 0));
    }

    #[test]
    fn test_opposite_sign_borrow() {
        assert_eq!(sum("1", "-1000001"), (-1, vec![1], -2));
        assert_eq!(sum("1000002", "-1"), (1, vec![1, 0, 1], 0));
        assert_eq!(sum("-1000", "1"), (-1, vec![999], 0));
    }

    #[test]
    fn test_equal_magnitudes_cancel() {
        assert_eq!(add(&v("1.1"), &v("-1.1"), None).unwrap(), NumberValue::zero());
        assert_eq!(add(&v("-1000"), &v("1000"), None).unwrap(), NumberValue::zero());
    }

    #[test]
    fn test_zero_operands() {
        assert_eq!(sum("0", "0"), (0, vec![0], 0));
        assert_eq!(sum("0", "-1"), (-1, vec![1], 0));
        assert_eq!(sum("1000", "0"), (1, vec![1], -1));
    }

    #[test]
    fn test_fractional_alignment() {
        assert_eq!(sum("1", "1.1"), (1, vec![100, 2], 1));
        assert_eq!(sum("7.86", "2.4"), (1, vec![260, 10], 1));
        assert_eq!(sum("0.1", "999.9"), (1, vec![1], -1));
    }

    #[test]
    fn test_subtract_negates_right() {
        let r = apply(Operator::Subtract, &v("7.86"), &v("2.4"), None).unwrap();
        assert_eq!(r.into_parts(), (1, vec![460, 5], 1));
    }

    #[test]
    fn test_block_limit() {
        // 10^9 against 0.001 needs 5 aligned blocks
        let result = add(&v("1000000000"), &v("0.001"), Some(4));
        assert_eq!(
            result,
            Err(NumericError::LimitExceeded {
                limit: "max_blocks",
                value: 5
            })
        );
        assert!(add(&v("1000000000"), &v("0.001"), Some(5)).is_ok());
    }
}
