// ============================================================================
// Evaluator
// Forces deferred expression trees into canonical values
// ============================================================================

use super::step;
use crate::domain::{DeferredOperation, EvaluatorConfig, Expr};
use crate::interfaces::{EvaluationEvent, EvaluationHandler, NoOpEvaluationHandler};
use crate::numeric::{NumberValue, NumericError, NumericResult};
use crate::utils::ensure_sufficient_stack;
use std::collections::HashMap;
use std::sync::Arc;

/// Walks an expression depth-first, left operand before right, and applies
/// each binary step.
///
/// Every pending node is forced at most once per evaluation, even when the
/// same subtree is shared by several parents. The evaluator holds no mutable
/// state, so one instance can serve any number of threads.
pub struct Evaluator {
    /// Resource limits
    config: EvaluatorConfig,

    /// Observer for evaluation events
    handler: Arc<dyn EvaluationHandler>,
}

/// Bookkeeping for a single `evaluate` call.
#[derive(Default)]
struct Walk {
    /// Results of nodes with more than one owner; a uniquely owned node is
    /// reached once and its result is dropped as soon as its parent steps.
    forced: HashMap<*const DeferredOperation, NumberValue>,
    steps: usize,
}

impl Evaluator {
    /// Create a new evaluator
    pub fn new(config: EvaluatorConfig, handler: Arc<dyn EvaluationHandler>) -> Self {
        Self { config, handler }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate an expression to its canonical value.
    ///
    /// A literal is returned unchanged.
    ///
    /// # Errors
    /// `LimitExceeded` when a configured bound is crossed, or
    /// `InvariantViolation` if a step meets an impossible block state.
    pub fn evaluate(&self, expr: &Expr) -> NumericResult<NumberValue> {
        let mut state = Walk::default();
        let result = self.walk(expr, 1, &mut state);
        self.finish(result, state.steps)
    }

    /// Evaluate a deferred operation that is not behind an `Arc`.
    pub fn evaluate_operation(&self, operation: &DeferredOperation) -> NumericResult<NumberValue> {
        let mut state = Walk::default();
        let result = self.force(operation, 1, &mut state);
        self.finish(result, state.steps)
    }

    fn finish(&self, result: NumericResult<NumberValue>, steps: usize) -> NumericResult<NumberValue> {
        match &result {
            Ok(value) => {
                tracing::trace!(steps, sign = value.sign().as_i8(), "evaluation completed");
                self.handler.on_event(EvaluationEvent::EvaluationCompleted {
                    steps,
                    result: value.clone(),
                });
            },
            Err(error) => {
                tracing::debug!(%error, steps, "evaluation failed");
                self.handler.on_event(EvaluationEvent::EvaluationFailed {
                    error: error.clone(),
                });
            },
        }
        result
    }

    fn walk(&self, expr: &Expr, depth: usize, state: &mut Walk) -> NumericResult<NumberValue> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Pending(operation) => {
                if Arc::strong_count(operation) == 1 {
                    return self.force(operation, depth, state);
                }
                let key = Arc::as_ptr(operation);
                if let Some(value) = state.forced.get(&key) {
                    return Ok(value.clone());
                }
                let value = self.force(operation, depth, state)?;
                state.forced.insert(key, value.clone());
                Ok(value)
            },
        }
    }

    fn force(
        &self,
        operation: &DeferredOperation,
        depth: usize,
        state: &mut Walk,
    ) -> NumericResult<NumberValue> {
        if let Some(max) = self.config.max_depth {
            if depth > max {
                return Err(NumericError::LimitExceeded {
                    limit: "max_depth",
                    value: depth,
                });
            }
        }

        ensure_sufficient_stack(|| {
            let left = self.walk(operation.left(), depth + 1, state)?;
            let right = self.walk(operation.right(), depth + 1, state)?;
            let result = step::apply(
                operation.operator(),
                &left,
                &right,
                self.config.max_blocks,
            )?;

            state.steps += 1;
            tracing::trace!(
                op = %operation.operator().symbol(),
                depth,
                exponent = result.exponent(),
                blocks = result.mantissa().len(),
                "step evaluated"
            );
            if self.handler.wants_steps() {
                self.handler.on_event(EvaluationEvent::StepEvaluated {
                    operator: operation.operator(),
                    depth,
                    result: result.clone(),
                });
            }
            Ok(result)
        })
    }
}

impl Default for Evaluator {
    /// Unbounded evaluator that emits no events
    fn default() -> Self {
        Self::new(EvaluatorConfig::default(), Arc::new(NoOpEvaluationHandler))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Operator;
    use crate::interfaces::Calculable;
    use parking_lot::Mutex;

    /// Records every event it sees
    #[derive(Default)]
    struct RecordingHandler {
        events: Mutex<Vec<EvaluationEvent>>,
    }

    impl EvaluationHandler for RecordingHandler {
        fn on_event(&self, event: EvaluationEvent) {
            self.events.lock().push(event);
        }
    }

    fn v(literal: &str) -> NumberValue {
        NumberValue::parse(literal).unwrap()
    }

    #[test]
    fn test_literal_is_terminal() {
        let value = v("-0.125");
        let result = Evaluator::default().evaluate(&Expr::from(value.clone())).unwrap();
        assert_eq!(result, value);
    }

    #[test]
    fn test_chain_evaluates_left_to_right() {
        let op = v("1").plus(2).unwrap().minus(10).unwrap().plus("0.5").unwrap();
        let result = Evaluator::default().evaluate_operation(&op).unwrap();
        assert_eq!(result, v("-6.5"));
    }

    #[test]
    fn test_events_follow_depth_first_order() {
        let handler = Arc::new(RecordingHandler::default());
        let evaluator = Evaluator::new(EvaluatorConfig::default(), handler.clone());

        let op = v("1").plus(2).unwrap().minus(v("10").plus(1).unwrap()).unwrap();
        evaluator.evaluate_operation(&op).unwrap();

        let events = handler.events.lock();
        let steps: Vec<(Operator, usize)> = events
            .iter()
            .filter_map(|e| match e {
                EvaluationEvent::StepEvaluated {
                    operator, depth, ..
                } => Some((*operator, *depth)),
                _ => None,
            })
            .collect();
        assert_eq!(
            steps,
            vec![(Operator::Add, 2), (Operator::Add, 2), (Operator::Subtract, 1)]
        );
        assert_eq!(
            events.last(),
            Some(&EvaluationEvent::EvaluationCompleted {
                steps: 3,
                result: v("-8"),
            })
        );
    }

    #[test]
    fn test_shared_subtree_forced_once() {
        let handler = Arc::new(RecordingHandler::default());
        let evaluator = Evaluator::new(EvaluatorConfig::default(), handler.clone());

        let shared = Expr::from(v("1").plus(1).unwrap());
        let mut expr = shared.clone();
        for _ in 0..40 {
            expr = Expr::from(DeferredOperation::new(Operator::Add, &expr, &expr).unwrap());
        }

        // 2 * 2^40 without memoization
        let result = evaluator.evaluate(&expr).unwrap();
        assert_eq!(result, NumberValue::from(2u64 << 40));

        let steps = handler
            .events
            .lock()
            .iter()
            .filter(|e| matches!(e, EvaluationEvent::StepEvaluated { .. }))
            .count();
        assert_eq!(steps, 41);
    }

    #[test]
    fn test_depth_limit() {
        let evaluator = Evaluator::new(
            EvaluatorConfig::default().with_max_depth(2),
            Arc::new(NoOpEvaluationHandler),
        );
        let shallow = v("1").plus(1).unwrap().plus(1).unwrap();
        assert!(evaluator.evaluate_operation(&shallow).is_ok());

        let deep = shallow.plus(1).unwrap();
        assert_eq!(
            evaluator.evaluate_operation(&deep),
            Err(NumericError::LimitExceeded {
                limit: "max_depth",
                value: 3
            })
        );
    }

    #[test]
    fn test_failure_is_reported() {
        let handler = Arc::new(RecordingHandler::default());
        let evaluator = Evaluator::new(EvaluatorConfig::default().with_max_blocks(1), handler.clone());

        let op = v("1000").plus("0.1").unwrap();
        let error = evaluator.evaluate_operation(&op).unwrap_err();
        assert!(matches!(error, NumericError::LimitExceeded { limit: "max_blocks", .. }));
        assert!(matches!(
            handler.events.lock().last(),
            Some(EvaluationEvent::EvaluationFailed { .. })
        ));
    }

    #[test]
    fn test_unshared_chain_keeps_no_intermediates() {
        let mut op = v("0.001").plus(1).unwrap();
        for _ in 0..1_000 {
            op = op.plus(1).unwrap();
        }
        let expr = Expr::from(op);

        let mut state = Walk::default();
        let result = Evaluator::default().walk(&expr, 1, &mut state).unwrap();
        assert_eq!(result, v("1001.001"));
        assert_eq!(state.steps, 1_001);
        assert!(state.forced.is_empty());
    }

    #[test]
    fn test_only_shared_nodes_are_memoized() {
        let shared = Expr::from(v("1").plus(2).unwrap());
        let left = Expr::from(DeferredOperation::new(Operator::Add, &shared, 10).unwrap());
        let expr = Expr::from(DeferredOperation::new(Operator::Subtract, left, &shared).unwrap());

        let mut state = Walk::default();
        let result = Evaluator::default().walk(&expr, 1, &mut state).unwrap();
        assert_eq!(result, NumberValue::from(10));
        assert_eq!(state.steps, 3);
        assert_eq!(state.forced.len(), 1);
    }

    #[test]
    fn test_far_apart_exponents_fail_without_limits() {
        let far = i64::MAX / 2;
        let huge = NumberValue::from_raw_parts(1, &[1], -far).unwrap();
        let tiny = NumberValue::from_raw_parts(1, &[1], far).unwrap();

        let result = Evaluator::default().evaluate_operation(&huge.plus(&tiny).unwrap());
        assert!(matches!(
            result,
            Err(NumericError::LimitExceeded { limit: "max_blocks", .. })
        ));
    }

    #[test]
    fn test_deep_chain_is_stack_safe() {
        let mut op = v("0").plus(1).unwrap();
        for _ in 0..100_000 {
            op = op.plus(1).unwrap();
        }
        let result = Evaluator::default().evaluate_operation(&op).unwrap();
        assert_eq!(result, NumberValue::from(100_001));
    }
}
