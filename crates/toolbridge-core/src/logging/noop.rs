//! Loggers for tests and silent embedding

use parking_lot::Mutex;

use super::traits::Logger;

/// A logger that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Keeps every message as `"LEVEL message"` so tests can assert on them
#[derive(Debug, Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded lines
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Whether any line at `level` contains `needle`
    pub fn contains(&self, level: &str, needle: &str) -> bool {
        let prefix = format!("{} ", level);
        self.lines
            .lock()
            .iter()
            .any(|l| l.starts_with(&prefix) && l.contains(needle))
    }

    fn push(&self, level: &str, message: &str) {
        self.lines.lock().push(format!("{} {}", level, message));
    }
}

impl Logger for RecordingLogger {
    fn debug(&self, message: &str) {
        self.push("DEBUG", message);
    }
    fn info(&self, message: &str) {
        self.push("INFO", message);
    }
    fn warn(&self, message: &str) {
        self.push("WARN", message);
    }
    fn error(&self, message: &str) {
        self.push("ERROR", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_logger() {
        let logger = NoOpLogger::new();
        logger.debug("debug message");
        logger.error("error message");
    }

    #[test]
    fn test_recording_logger() {
        let logger = RecordingLogger::new();
        logger.info("[McpClient] Listed 2 tools");
        logger.warn("[ConnectionManager] close failed");

        assert_eq!(logger.lines().len(), 2);
        assert!(logger.contains("WARN", "close failed"));
        assert!(!logger.contains("ERROR", "close failed"));
    }
}
