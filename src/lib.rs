// ============================================================================
// Block Decimal Library
// Arbitrary-precision decimal addition with deferred, chainable evaluation
// ============================================================================

//! # blockdec
//!
//! Exact decimal addition and subtraction over numbers of any finite size.
//!
//! ## Features
//!
//! - **Base-1000 block mantissas** with a signed block exponent
//! - **Canonical form**: equal values always have identical
//!   `(sign, mantissa, exponent)` triples
//! - **Deferred evaluation**: `plus`/`minus` build an expression tree,
//!   `calculate` forces it
//! - **Stack-safe** evaluation and teardown of arbitrarily long chains
//!
//! ## Example
//!
//! ```rust
//! use blockdec::prelude::*;
//!
//! let x = NumberValue::parse("7.86").unwrap();
//! let pending = x.minus(2.4).unwrap();
//! let result = pending.calculate().unwrap();
//!
//! assert_eq!(result.sign(), Sign::Positive);
//! assert_eq!(result.mantissa(), &[460, 5]);
//! assert_eq!(result.exponent(), 1);
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{DeferredOperation, EvaluatorConfig, Expr, Operator, ParserConfig};
    pub use crate::engine::{
        create_from_config, create_parser_from_config, Evaluator, EvaluatorBuilder,
    };
    pub use crate::interfaces::{
        Calculable, EvaluationEvent, EvaluationHandler, IntoOperand, LoggingEvaluationHandler,
        NoOpEvaluationHandler,
    };
    pub use crate::numeric::{LiteralParser, NumberValue, NumericError, NumericResult, Sign};
}
