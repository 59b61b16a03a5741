//! Log sinks

use std::io::Write;
use std::sync::Mutex;

use is_terminal::IsTerminal;

use crate::domain::ports::LogSink;

/// Writes to stdout
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    color: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            color: detect_color_impl(|key| std::env::var(key).ok(), std::io::stdout().is_terminal()),
        }
    }

    /// Force colors on or off
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for ConsoleSink {
    fn output(&self, message: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{message}");
    }

    fn supports_color(&self) -> bool {
        self.color
    }
}

fn detect_color_impl(get_env: impl Fn(&str) -> Option<String>, is_tty: bool) -> bool {
    let term = get_env("TERM").unwrap_or_default();
    let no_color = get_env("NO_COLOR").is_some();
    is_tty && !no_color && !term.eq_ignore_ascii_case("dumb")
}

/// Keeps every message in memory, plain text only
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything logged so far, joined with newlines
    pub fn output(&self) -> String {
        self.lines.lock().map(|l| l.join("\n")).unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

impl LogSink for MemorySink {
    fn output(&self, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn color_requires_tty() {
        assert!(detect_color_impl(env(&[("TERM", "xterm-256color")]), true));
        assert!(!detect_color_impl(env(&[("TERM", "xterm-256color")]), false));
    }

    #[test]
    fn no_color_and_dumb_terminals_disable_color() {
        assert!(!detect_color_impl(env(&[("NO_COLOR", "1")]), true));
        assert!(!detect_color_impl(env(&[("TERM", "dumb")]), true));
    }

    #[test]
    fn memory_sink_joins_lines() {
        let sink = MemorySink::new();
        LogSink::output(&sink, "one");
        LogSink::output(&sink, "two\nthree");

        assert_eq!(sink.output(), "one\ntwo\nthree");
        assert_eq!(sink.lines().len(), 2);
        assert!(!sink.supports_color());

        sink.clear();
        assert_eq!(sink.output(), "");
    }
}
