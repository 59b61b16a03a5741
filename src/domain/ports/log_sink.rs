//! Log Sink port
//!
//! Where formatted log lines end up.
//! Implementations:
//! - `ConsoleSink` - stdout
//! - `MemorySink` - in-memory buffer for tests

/// Receives fully formatted log output
pub trait LogSink: Send + Sync {
    /// Write one message (may contain newlines)
    fn output(&self, message: &str);

    /// Whether messages may contain ANSI color codes
    fn supports_color(&self) -> bool {
        false
    }
}
