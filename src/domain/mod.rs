// ============================================================================
// Domain Models Module
// Expression tree and configuration value objects
// ============================================================================

pub mod config;
pub mod expression;

pub use config::{EvaluatorConfig, ParserConfig};
pub use expression::{DeferredOperation, Expr, Operator};
