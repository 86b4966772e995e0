// ============================================================================
// Logging Setup
// tracing-subscriber initialization for binaries and demos
// ============================================================================

use tracing::Level;

/// Install a formatted `tracing` subscriber at `level`.
///
/// Library code only emits events; call this once from a binary to see them.
/// Fails if a global subscriber is already installed.
pub fn init_logging(level: Level) -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        // The first call may lose to another test; either way one is installed
        let _ = init_logging(Level::WARN);
        assert!(init_logging(Level::WARN).is_err());
    }
}
