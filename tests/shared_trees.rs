// ============================================================================
// Shared Expression Trees
// One immutable tree forced from many threads and many chains
// ============================================================================

use blockdec::prelude::*;
use std::sync::Arc;

fn build_ledger(entries: usize) -> DeferredOperation {
    let mut ledger = NumberValue::parse("1000000.000001").unwrap().plus(0).unwrap();
    for i in 0..entries {
        let amount = format!("{}.{:03}", i % 977, i % 1000);
        ledger = if i % 3 == 0 {
            ledger.minus(amount).unwrap()
        } else {
            ledger.plus(amount).unwrap()
        };
    }
    ledger
}

#[test]
fn test_concurrent_evaluation_is_deterministic() {
    let ledger = Arc::new(build_ledger(2_000));
    let expected = Evaluator::default().evaluate_operation(&ledger).unwrap();

    let results: Vec<NumberValue> = crossbeam::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                scope.spawn(move |_| ledger.calculate().unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
    .unwrap();

    assert!(results.iter().all(|r| *r == expected));
}

#[test]
fn test_subtree_reused_across_chains() {
    let base = Arc::new(build_ledger(50));
    let base_value = Evaluator::default().evaluate_operation(&base).unwrap();

    let up = DeferredOperation::new(Operator::Add, Arc::clone(&base), "0.5").unwrap();
    let down = DeferredOperation::new(Operator::Subtract, Arc::clone(&base), "0.5").unwrap();

    let up = up.calculate().unwrap();
    let down = down.calculate().unwrap();
    assert_eq!(up.minus(&down).unwrap().calculate().unwrap(), NumberValue::from(1));

    // The shared base is untouched by either chain
    assert_eq!(base.calculate().unwrap(), base_value);
}

#[test]
fn test_untrusted_limits_stop_long_chains() {
    let evaluator = EvaluatorBuilder::untrusted_input()
        .build(Arc::new(NoOpEvaluationHandler))
        .unwrap();

    assert!(evaluator.evaluate_operation(&build_ledger(5_000)).is_ok());
    assert!(matches!(
        evaluator.evaluate_operation(&build_ledger(20_000)),
        Err(NumericError::LimitExceeded { limit: "max_depth", .. })
    ));
}
