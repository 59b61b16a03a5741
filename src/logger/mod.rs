//! Build logger
//!
//! Every line is `HH:MM:SS <prefix> <message>`. Where the lines go is decided
//! by a [`LogSink`]: the console for the CLI, memory for tests.

mod format;
mod sink;

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crossterm::style::Stylize;

use crate::domain::ports::LogSink;
use crate::error::CompileError;

pub use format::{current_time, format_duration, format_time};
pub use sink::{ConsoleSink, MemorySink};

/// Default label printed after the timestamp
pub const DEFAULT_PREFIX: &str = " SCSS ";

#[derive(Clone)]
pub struct Logger {
    prefix: String,
    cwd: Option<PathBuf>,
    sink: Arc<dyn LogSink>,
    color: bool,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("prefix", &self.prefix)
            .field("cwd", &self.cwd)
            .field("color", &self.color)
            .finish()
    }
}

impl Logger {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        let color = sink.supports_color();
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            cwd: None,
            sink,
            color,
        }
    }

    /// Logger writing to stdout
    pub fn console() -> Self {
        Self::new(Arc::new(ConsoleSink::new()))
    }

    /// Logger capturing into memory, with a handle to read it back
    pub fn memory() -> (Self, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (Self::new(sink.clone()), sink)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// File paths in messages are shown relative to `cwd`
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn has_cwd(&self) -> bool {
        self.cwd.is_some()
    }

    pub fn log(&self, message: &str) {
        let time = current_time();
        let line = if self.color {
            format!(
                "{} {} {message}",
                time.dark_grey(),
                self.prefix.as_str().black().on_magenta()
            )
        } else {
            format!("{time} {} {message}", self.prefix)
        };
        self.sink.output(&line);
    }

    pub fn log_build_start(&self) {
        self.log(&self.green("Build started"));
    }

    pub fn log_build_success(&self, file_name: &str, duration: Duration) {
        self.log_with_duration(
            &format!("{}: {}", self.green("Build finished"), self.yellow(file_name)),
            duration,
        );
    }

    pub fn log_with_duration(&self, message: &str, duration: Duration) {
        self.log(&format!("{message} after {}", format_duration(duration)));
    }

    pub fn log_error(&self, label: &str, error: &dyn Display) {
        self.log(&format!("{}: {error}", self.red(label)));
    }

    pub fn log_warning(&self, label: &str, message: &str) {
        self.log(&format!("{}: {message}", self.yellow(label)));
    }

    /// Compile error with the indented message and the engine's code frame
    pub fn log_compile_error(&self, error: &CompileError) {
        let message = error
            .message
            .lines()
            .map(|line| format!("    {line}"))
            .collect::<Vec<_>>()
            .join("\n");
        let mut output = format!("\n{message}\n");

        if let Some(formatted) = &error.formatted {
            let frame: Vec<&str> = formatted.lines().skip(2).collect();
            output.push_str(&frame.join("\n"));
            output.push('\n');
        }

        let file = self.relative(&error.file);
        self.log_tool_output(
            &format!(
                "{} in file {} on line {}:",
                self.red("Compilation Error"),
                self.yellow(&file.display().to_string()),
                self.yellow(&error.line.to_string())
            ),
            &output,
        );
    }

    /// A log line followed by a tool's raw output
    pub fn log_tool_output(&self, message: &str, output: &str) {
        self.log(message);
        self.sink.output(output);
    }

    pub fn log_skipped(&self, src: &Path) {
        self.log(&format!(
            "{} build of {} as file was not found",
            self.yellow("SKIPPED"),
            self.relative(src).display()
        ));
    }

    pub fn log_watch_started(&self, patterns: &[String]) {
        self.log(&format!(
            "{} {}",
            self.green("Watching for changes in"),
            patterns.join(", ")
        ));
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        match &self.cwd {
            Some(cwd) => path.strip_prefix(cwd).unwrap_or(path),
            None => path,
        }
    }

    fn green(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn yellow(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn red(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::console()
    }
}
