// ============================================================================
// Evaluation Handler Interface
// Observes the steps an evaluator takes while forcing an expression
// ============================================================================

use crate::domain::Operator;
use crate::numeric::{NumberValue, NumericError};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Events emitted by the evaluator
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum EvaluationEvent {
    /// One binary step finished
    StepEvaluated {
        operator: Operator,
        /// Depth of the node, the root being 1
        depth: usize,
        result: NumberValue,
    },

    /// The whole expression was forced
    EvaluationCompleted { steps: usize, result: NumberValue },

    /// Evaluation stopped with an error
    EvaluationFailed {
        #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_error"))]
        error: NumericError,
    },
}

#[cfg(feature = "serde")]
fn serialize_error<S: serde::Serializer>(error: &NumericError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

/// Event handler trait for observing evaluation
/// Implementations can handle logging, metrics, auditing, etc.
pub trait EvaluationHandler: Send + Sync {
    /// Handle an evaluation event
    fn on_event(&self, event: EvaluationEvent);

    /// Whether per-step events are wanted at all.
    ///
    /// Evaluators skip building `StepEvaluated` events when this is false.
    fn wants_steps(&self) -> bool {
        true
    }
}

/// No-op event handler (the default)
pub struct NoOpEvaluationHandler;

impl EvaluationHandler for NoOpEvaluationHandler {
    fn on_event(&self, _event: EvaluationEvent) {
        // Do nothing
    }

    fn wants_steps(&self) -> bool {
        false
    }
}

/// Logging event handler
pub struct LoggingEvaluationHandler;

impl EvaluationHandler for LoggingEvaluationHandler {
    fn on_event(&self, event: EvaluationEvent) {
        tracing::debug!("Evaluation event: {:?}", event);
    }
}
