// ============================================================================
// Numeric Module
// Arbitrary-precision base-1000 decimals
// ============================================================================
//
// This module provides:
// - NumberValue: canonical (sign, mantissa, exponent) snapshot
// - block: alignment, magnitude comparison, carry and borrow loops
// - LiteralParser: decimal literals and native numbers into NumberValue
// - NumericError: Error types for parsing and evaluation
//
// Design principles:
// - No floating-point operations on values
// - All fallible operations return Result (no panics)
// - Blocks are u16 in [0, 999], least-significant first
// - Values are immutable; blocks are shared, never copied

pub mod block;
mod errors;
mod number_value;
mod parser;

pub use block::Block;
pub use errors::{NumericError, NumericResult};
pub use number_value::{NumberValue, Sign};
pub use parser::{parse, LiteralParser};
