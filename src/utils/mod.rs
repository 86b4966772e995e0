// ============================================================================
// Utilities Module
// Stack safety and logging helpers
// ============================================================================

#[cfg(feature = "logging")]
mod logging;
mod stack;

#[cfg(feature = "logging")]
pub use logging::init_logging;
pub use stack::ensure_sufficient_stack;
