//! Lint Engine port

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::KabaResult;

/// Severity of a rule violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// One rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintWarning {
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub column: usize,
    pub rule: String,
    pub severity: Severity,
    pub text: String,
}

/// Lint results for a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileLintResult {
    pub source: PathBuf,
    pub warnings: Vec<LintWarning>,
    pub errored: bool,
}

/// Lint invocation
#[derive(Debug, Clone, Default)]
pub struct LintRequest {
    /// Rule configuration file; `None` uses the engine's built-in rules
    pub config_file: Option<PathBuf>,
    pub files: Vec<PathBuf>,
    pub cache: bool,
    /// Rewrite files to fix fixable violations
    pub fix: bool,
}

/// Aggregate lint result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    /// True if any file has an error-severity violation
    pub errored: bool,
    /// Human readable report, empty when there is nothing to report
    pub output: String,
    pub results: Vec<FileLintResult>,
}

impl LintReport {
    pub fn warning_count(&self) -> usize {
        self.results.iter().map(|r| r.warnings.len()).sum()
    }
}

/// Style linter
pub trait LintEngine: Send + Sync {
    fn lint(&self, request: &LintRequest) -> KabaResult<LintReport>;
}
