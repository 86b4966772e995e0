// ============================================================================
// Block Arithmetic
// Base-1000 magnitude operations over least-significant-first block slices
// ============================================================================
//
// Every function here works on magnitudes only. Signs are resolved by the
// evaluator, which keeps alignment, comparison and the carry/borrow loops as
// separate steps that can be checked block by block.

use super::errors::{NumericError, NumericResult};
use smallvec::SmallVec;
use std::cmp::Ordering;

/// One base-1000 digit group, always in `[0, 999]`.
pub type Block = u16;

/// Working buffer for intermediate mantissas.
///
/// Eight blocks cover 24 decimal digits inline; longer values spill to the heap.
pub type Blocks = SmallVec<[Block; 8]>;

/// Radix of a block.
pub const BLOCK_BASE: u32 = 1000;

/// Decimal digits held by one block.
pub const BLOCK_DIGITS: usize = 3;

/// Largest legal block value.
pub const MAX_BLOCK: Block = 999;

/// Most blocks a single mantissa buffer can address.
pub const MAX_ALIGNED_BLOCKS: usize = isize::MAX as usize / std::mem::size_of::<Block>();

/// Two mantissas expressed at a shared exponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aligned {
    pub left: Blocks,
    pub right: Blocks,
    pub exponent: i64,
}

/// Check that a block lies in `[0, 999]`.
#[inline]
pub fn is_valid_block(block: Block) -> bool {
    block <= MAX_BLOCK
}

/// Number of zero blocks a mantissa at `exponent` needs to reach `common`.
///
/// `common` must be the larger (finer) exponent of the pair.
pub fn alignment_shift(exponent: i64, common: i64) -> NumericResult<usize> {
    let gap = common
        .checked_sub(exponent)
        .ok_or(NumericError::InvariantViolation("exponent gap overflows i64"))?;
    usize::try_from(gap).map_err(|_| {
        NumericError::InvariantViolation("alignment target is coarser than operand")
    })
}

/// Widest mantissa the alignment of the two operands would produce.
///
/// Lets callers enforce block limits before anything is allocated.
pub fn aligned_width(
    left_len: usize,
    left_exponent: i64,
    right_len: usize,
    right_exponent: i64,
) -> NumericResult<usize> {
    let common = left_exponent.max(right_exponent);
    let left = alignment_shift(left_exponent, common)?.checked_add(left_len);
    let right = alignment_shift(right_exponent, common)?.checked_add(right_len);
    match (left, right) {
        (Some(l), Some(r)) => Ok(l.max(r)),
        _ => Err(NumericError::InvariantViolation(
            "aligned mantissa length overflows usize",
        )),
    }
}

/// Bring two mantissas to a common exponent.
///
/// The common exponent is the larger of the two (the finer scale). The
/// operand at the coarser scale gets zero blocks inserted at its
/// least-significant end, so no block of either operand is ever dropped.
///
/// Fails with `LimitExceeded` when the aligned width cannot be allocated.
pub fn align(
    left: &[Block],
    left_exponent: i64,
    right: &[Block],
    right_exponent: i64,
) -> NumericResult<Aligned> {
    let width = aligned_width(left.len(), left_exponent, right.len(), right_exponent)?;
    if width > MAX_ALIGNED_BLOCKS {
        return Err(too_wide(width));
    }

    let exponent = left_exponent.max(right_exponent);
    Ok(Aligned {
        left: shifted(left, alignment_shift(left_exponent, exponent)?)?,
        right: shifted(right, alignment_shift(right_exponent, exponent)?)?,
        exponent,
    })
}

fn shifted(blocks: &[Block], shift: usize) -> NumericResult<Blocks> {
    let width = blocks.len() + shift;
    let mut out = Blocks::new();
    out.try_reserve_exact(width).map_err(|_| too_wide(width))?;
    out.extend(std::iter::repeat(0).take(shift));
    out.extend_from_slice(blocks);
    Ok(out)
}

fn too_wide(width: usize) -> NumericError {
    NumericError::LimitExceeded {
        limit: "max_blocks",
        value: width,
    }
}

/// Compare two magnitudes from the most-significant block down.
///
/// Slices may differ in length; missing high blocks count as zero, so
/// `[5]` and `[5, 0]` compare equal.
pub fn compare_magnitude(a: &[Block], b: &[Block]) -> Ordering {
    let width = a.len().max(b.len());
    for i in (0..width).rev() {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            decided => return decided,
        }
    }
    Ordering::Equal
}

/// Blockwise sum of two magnitudes.
///
/// A carry out of the most-significant block appends a new block.
pub fn add_magnitudes(a: &[Block], b: &[Block]) -> Blocks {
    let width = a.len().max(b.len());
    let mut out = Blocks::with_capacity(width + 1);
    let mut carry = 0u32;

    for i in 0..width {
        let x = u32::from(a.get(i).copied().unwrap_or(0));
        let y = u32::from(b.get(i).copied().unwrap_or(0));
        let mut sum = x + y + carry;
        if sum >= BLOCK_BASE {
            sum -= BLOCK_BASE;
            carry = 1;
        } else {
            carry = 0;
        }
        out.push(sum as Block);
    }

    if carry > 0 {
        out.push(carry as Block);
    }
    out
}

/// Blockwise difference `greater - lesser`.
///
/// Callers establish the order with [`compare_magnitude`] first. A borrow
/// left over after the last block means the order was wrong.
pub fn sub_magnitudes(greater: &[Block], lesser: &[Block]) -> NumericResult<Blocks> {
    if lesser.len() > greater.len() && lesser[greater.len()..].iter().any(|&b| b != 0) {
        return Err(NumericError::InvariantViolation(
            "subtrahend is wider than minuend",
        ));
    }

    let mut out = Blocks::with_capacity(greater.len());
    let mut borrow = 0i32;

    for (i, &g) in greater.iter().enumerate() {
        let l = i32::from(lesser.get(i).copied().unwrap_or(0));
        let mut diff = i32::from(g) - l - borrow;
        if diff < 0 {
            diff += BLOCK_BASE as i32;
            borrow = 1;
        } else {
            borrow = 0;
        }
        out.push(diff as Block);
    }

    if borrow != 0 {
        return Err(NumericError::InvariantViolation(
            "subtrahend magnitude exceeds minuend",
        ));
    }
    Ok(out)
}
