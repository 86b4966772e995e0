// ============================================================================
// Evaluator Factory
// Creates evaluators and parsers with validated configuration
// ============================================================================

use crate::domain::config::{EvaluatorConfig, ParserConfig};
use crate::engine::Evaluator;
use crate::interfaces::{EvaluationHandler, LoggingEvaluationHandler};
use crate::numeric::LiteralParser;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates an evaluator from configuration
///
/// # Arguments
/// * `config` - Evaluation limits
/// * `handler` - Observer for evaluation events
///
/// # Returns
/// * `Result<Evaluator, String>` - Configured evaluator or error
///
/// # Example
/// ```
/// use blockdec::prelude::*;
/// use std::sync::Arc;
///
/// let config = EvaluatorConfig::untrusted_input();
/// let evaluator = create_from_config(config, Arc::new(NoOpEvaluationHandler)).unwrap();
/// ```
pub fn create_from_config(
    config: EvaluatorConfig,
    handler: Arc<dyn EvaluationHandler>,
) -> Result<Evaluator, String> {
    config.validate()?;
    Ok(Evaluator::new(config, handler))
}

/// Creates a literal parser from configuration
pub fn create_parser_from_config(config: ParserConfig) -> Result<LiteralParser, String> {
    config.validate()?;
    Ok(LiteralParser::with_config(config))
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating evaluators with fluent API
///
/// # Example
/// ```
/// use blockdec::prelude::*;
/// use std::sync::Arc;
///
/// let evaluator = EvaluatorBuilder::new()
///     .with_max_depth(64)
///     .with_max_blocks(1_000)
///     .build(Arc::new(NoOpEvaluationHandler))
///     .unwrap();
///
/// let sum = NumberValue::from(1).plus(999).unwrap();
/// assert_eq!(evaluator.evaluate_operation(&sum).unwrap().exponent(), -1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EvaluatorBuilder {
    config: EvaluatorConfig,
}

impl EvaluatorBuilder {
    /// Create a new builder with no limits
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Limits
    // ========================================================================

    /// Set maximum expression depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = Some(depth);
        self
    }

    /// Set maximum aligned mantissa width in blocks
    pub fn with_max_blocks(mut self, blocks: usize) -> Self {
        self.config.max_blocks = Some(blocks);
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    /// Apply the untrusted-input limits
    pub fn untrusted_input() -> Self {
        Self {
            config: EvaluatorConfig::untrusted_input(),
        }
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the evaluator
    pub fn build(self, handler: Arc<dyn EvaluationHandler>) -> Result<Evaluator, String> {
        create_from_config(self.config, handler)
    }

    /// Build the evaluator with a `tracing` event handler
    pub fn build_with_logging(self) -> Result<Evaluator, String> {
        self.build(Arc::new(LoggingEvaluationHandler))
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &EvaluatorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{Calculable, NoOpEvaluationHandler};
    use crate::numeric::{NumberValue, NumericError};

    #[test]
    fn test_create_unbounded_evaluator() {
        let evaluator =
            create_from_config(EvaluatorConfig::unbounded(), Arc::new(NoOpEvaluationHandler))
                .unwrap();
        assert_eq!(evaluator.config().max_depth, None);
    }

    #[test]
    fn test_create_rejects_invalid_config() {
        let config = EvaluatorConfig::default().with_max_depth(0);
        assert!(create_from_config(config, Arc::new(NoOpEvaluationHandler)).is_err());
    }

    #[test]
    fn test_create_parser() {
        let parser = create_parser_from_config(ParserConfig::lenient()).unwrap();
        assert_eq!(parser.parse("+7").unwrap(), NumberValue::from(7));
        assert!(create_parser_from_config(ParserConfig::default().with_max_digits(0)).is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let evaluator = EvaluatorBuilder::new()
            .with_max_depth(1)
            .build(Arc::new(NoOpEvaluationHandler))
            .unwrap();

        let op = NumberValue::from(1).plus(1).unwrap().plus(1).unwrap();
        assert!(matches!(
            evaluator.evaluate_operation(&op),
            Err(NumericError::LimitExceeded { limit: "max_depth", .. })
        ));
    }

    #[test]
    fn test_preset_builder() {
        let builder = EvaluatorBuilder::untrusted_input();
        assert_eq!(builder.get_config(), &EvaluatorConfig::untrusted_input());

        let evaluator = builder.build_with_logging().unwrap();
        let op = NumberValue::from(-1000).minus(-1).unwrap();
        assert_eq!(
            evaluator.evaluate_operation(&op).unwrap(),
            NumberValue::from(-999)
        );
        assert_eq!(op.calculate().unwrap(), NumberValue::from(-999));
    }
}
