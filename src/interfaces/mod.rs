// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod evaluation_handler;
mod operand;

pub use evaluation_handler::{
    EvaluationEvent, EvaluationHandler, LoggingEvaluationHandler, NoOpEvaluationHandler,
};
pub use operand::{Calculable, IntoOperand};
