//! Error types for kaba-scss
//!
//! Library code returns `KabaResult`; the binary wraps it in `anyhow`.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for kaba-scss operations
pub type KabaResult<T> = Result<T, KabaError>;

/// Structured diagnostic produced by the SCSS engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    /// File the error was reported in
    pub file: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// 1-based column number
    pub column: usize,
    /// Human readable message (may span multiple lines)
    pub message: String,
    /// Engine formatted code frame, including its two header lines
    pub formatted: Option<String>,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.file.display(),
            self.line,
            self.column,
            self.message
        )
    }
}

/// Main error type for kaba-scss operations
#[derive(Error, Debug)]
pub enum KabaError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry source file does not exist
    #[error("source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// SCSS compilation failed
    #[error("compilation error in {0}")]
    Compile(CompileError),

    /// CSS post-processing failed
    #[error("post-processing failed for {file}: {message}")]
    PostProcess { file: PathBuf, message: String },

    /// Minification failed
    #[error("minification failed for {file}: {message}")]
    Minify { file: PathBuf, message: String },

    /// Browser target queries could not be resolved
    #[error("invalid browser targets: {0}")]
    Targets(String),

    /// Source map could not be built or serialized
    #[error("source map error: {0}")]
    SourceMap(String),

    /// Lint rule configuration could not be loaded
    #[error("invalid lint configuration in {file}: {message}")]
    LintConfig { file: PathBuf, message: String },

    /// Lint engine failure (unreadable file, failed fix)
    #[error("lint failed: {0}")]
    Lint(String),

    /// Build configuration could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// File watcher failure
    #[error("watch error: {0}")]
    Watch(String),

    /// Output file could not be written
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<notify::Error> for KabaError {
    fn from(err: notify::Error) -> Self {
        KabaError::Watch(err.to_string())
    }
}

impl KabaError {
    /// Whether this error is a missing file (recoverable during the read stage)
    pub fn is_not_found(&self) -> bool {
        match self {
            KabaError::SourceNotFound { .. } => true,
            KabaError::Io(err) => err.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
