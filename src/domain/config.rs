// ============================================================================
// Configuration
// Parser leniency and evaluation limits
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Parser Configuration
// ============================================================================

/// Controls which literal spellings the parser accepts
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParserConfig {
    /// Strip surrounding ASCII whitespace before parsing
    pub trim_whitespace: bool,

    /// Accept a leading `+`
    pub allow_plus_sign: bool,

    /// Optional: Maximum number of digit characters in a literal
    /// None means unlimited
    pub max_digits: Option<usize>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            trim_whitespace: true,
            allow_plus_sign: false,
            max_digits: None,
        }
    }
}

impl ParserConfig {
    /// Builder method: Toggle whitespace trimming
    pub fn with_trim_whitespace(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }

    /// Builder method: Toggle acceptance of a leading `+`
    pub fn with_plus_sign(mut self, allow: bool) -> Self {
        self.allow_plus_sign = allow;
        self
    }

    /// Builder method: Bound the number of digits
    pub fn with_max_digits(mut self, max: usize) -> Self {
        self.max_digits = Some(max);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_digits == Some(0) {
            return Err("Maximum digit count must be positive".to_string());
        }
        Ok(())
    }

    /// Exact input only: no whitespace, no `+`
    pub fn strict() -> Self {
        Self {
            trim_whitespace: false,
            allow_plus_sign: false,
            max_digits: None,
        }
    }

    /// Accepts surrounding whitespace and a leading `+`
    pub fn lenient() -> Self {
        Self {
            trim_whitespace: true,
            allow_plus_sign: true,
            max_digits: None,
        }
    }
}

// ============================================================================
// Evaluator Configuration
// ============================================================================

/// Resource bounds applied while forcing a deferred expression
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvaluatorConfig {
    /// Optional: Maximum nesting depth of pending nodes
    /// None means unlimited depth
    pub max_depth: Option<usize>,

    /// Optional: Maximum mantissa width (in blocks) of any aligned step
    /// None means unlimited width
    pub max_blocks: Option<usize>,
}

impl EvaluatorConfig {
    /// Builder method: Set maximum expression depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Builder method: Set maximum aligned mantissa width
    pub fn with_max_blocks(mut self, blocks: usize) -> Self {
        self.max_blocks = Some(blocks);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == Some(0) {
            return Err("Maximum depth must be positive".to_string());
        }
        if self.max_blocks == Some(0) {
            return Err("Maximum block count must be positive".to_string());
        }
        Ok(())
    }

    /// No limits (the default)
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Limits suited to expressions built from untrusted input
    /// - Depth: 10,000 pending nodes
    /// - Width: 100,000 blocks (300,000 digits)
    pub fn untrusted_input() -> Self {
        Self::default()
            .with_max_depth(10_000)
            .with_max_blocks(100_000)
    }
}
