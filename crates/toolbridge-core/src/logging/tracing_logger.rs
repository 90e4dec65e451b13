//! Logger that forwards to `tracing`

use super::traits::Logger;

/// Forwards every message to the `tracing` macros under a fixed target
///
/// Pair it with a subscriber (e.g. `tracing-subscriber`) in the host binary;
/// without one installed, messages are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "toolbridge", "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "toolbridge", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "toolbridge", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "toolbridge", "{}", message);
    }
}
