//! Domain Ports (Interfaces)
//!
//! Boundaries to the external engines. The infrastructure layer provides the
//! concrete implementations; tests swap in fakes.

pub mod css_transformer;
pub mod file_watcher;
pub mod lint_engine;
pub mod log_sink;
pub mod minifier;
pub mod scss_engine;

pub use css_transformer::{CssTransformer, ProcessedCss, TransformRequest};
pub use file_watcher::{FileEvent, FileEventKind, FileWatcher, WatchRequest};
pub use lint_engine::{FileLintResult, LintEngine, LintReport, LintRequest, LintWarning, Severity};
pub use log_sink::LogSink;
pub use minifier::Minifier;
pub use scss_engine::{CompileRequest, CompiledScss, ScssEngine};
