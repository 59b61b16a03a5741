//! Per-entry compilation outcome and the aggregate build report

use std::path::PathBuf;

/// Result of running the pipeline for one entry.
///
/// Only `Clean` counts as a pass. A missing source (`Skipped`) fails the
/// aggregate so a build never turns green without producing its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilationOutcome {
    /// Output written, no lint errors
    Clean,
    /// Output written, the lint engine reported errors
    LintErrors,
    /// Source file was not found, nothing was written
    Skipped,
    /// Read, compile, post-process, minify or write failed
    Failed,
}

impl CompilationOutcome {
    pub fn is_success(self) -> bool {
        self == CompilationOutcome::Clean
    }

    /// Whether the entry produced output files
    pub fn wrote_output(self) -> bool {
        matches!(
            self,
            CompilationOutcome::Clean | CompilationOutcome::LintErrors
        )
    }
}

/// Outcomes of one full build, in entry registration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub outcomes: Vec<(PathBuf, CompilationOutcome)>,
}

impl BuildReport {
    pub fn push(&mut self, out_file: PathBuf, outcome: CompilationOutcome) {
        self.outcomes.push((out_file, outcome));
    }

    /// True when every entry compiled cleanly (vacuously true for no entries)
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|(_, o)| o.is_success())
    }

    pub fn has_lint_errors(&self) -> bool {
        self.count(CompilationOutcome::LintErrors) > 0
    }

    pub fn count(&self, outcome: CompilationOutcome) -> usize {
        self.outcomes.iter().filter(|(_, o)| *o == outcome).count()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
