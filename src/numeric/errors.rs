// ============================================================================
// Numeric Errors
// Error types for block-decimal parsing, chaining and evaluation
// ============================================================================

use std::fmt;

/// Errors that can occur while building or evaluating block decimals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Input literal could not be interpreted as a decimal number
    MalformedLiteral {
        /// The literal as supplied by the caller
        literal: String,
        /// Short description of what was wrong with it
        reason: &'static str,
    },
    /// `plus`/`minus` received something that cannot become an operand
    InvalidOperand {
        /// Why the operand was rejected
        reason: String,
    },
    /// A mantissa/exponent state that canonical values can never be in.
    /// Signals a broken precondition, not bad user input.
    InvariantViolation(&'static str),
    /// A configured evaluation limit was crossed
    LimitExceeded {
        /// Name of the limit (`max_depth`, `max_blocks`)
        limit: &'static str,
        /// The value that crossed it
        value: usize,
    },
    /// Conversion would lose significant digits
    PrecisionLoss,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::MalformedLiteral { literal, reason } => {
                write!(f, "malformed literal {:?}: {}", literal, reason)
            },
            NumericError::InvalidOperand { reason } => write!(f, "invalid operand: {}", reason),
            NumericError::InvariantViolation(what) => {
                write!(f, "invariant violation: {}", what)
            },
            NumericError::LimitExceeded { limit, value } => {
                write!(f, "evaluation limit exceeded: {} reached {}", limit, value)
            },
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
        }
    }
}

impl std::error::Error for NumericError {}

impl NumericError {
    /// Shorthand for a `MalformedLiteral` error.
    pub(crate) fn malformed(literal: &str, reason: &'static str) -> Self {
        NumericError::MalformedLiteral {
            literal: literal.to_string(),
            reason,
        }
    }

    /// Whether the caller can recover by supplying different input.
    ///
    /// `InvariantViolation` is the only kind that indicates a bug rather
    /// than bad input.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, NumericError::InvariantViolation(_))
    }
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NumericError::malformed("1.2.3", "more than one decimal point").to_string(),
            "malformed literal \"1.2.3\": more than one decimal point"
        );
        assert_eq!(
            NumericError::InvalidOperand {
                reason: "missing operand".to_string()
            }
            .to_string(),
            "invalid operand: missing operand"
        );
        assert_eq!(
            NumericError::LimitExceeded {
                limit: "max_depth",
                value: 65
            }
            .to_string(),
            "evaluation limit exceeded: max_depth reached 65"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(NumericError::PrecisionLoss, NumericError::PrecisionLoss);
        assert_ne!(
            NumericError::PrecisionLoss,
            NumericError::InvariantViolation("empty mantissa")
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(NumericError::malformed("x", "not a digit").is_recoverable());
        assert!(!NumericError::InvariantViolation("block out of range").is_recoverable());
    }
}
