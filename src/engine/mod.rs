// ============================================================================
// Engine Module
// Evaluation of deferred expressions
// ============================================================================

mod evaluator;

pub mod factory;
pub mod step;

pub use evaluator::Evaluator;
pub use factory::{create_from_config, create_parser_from_config, EvaluatorBuilder};
