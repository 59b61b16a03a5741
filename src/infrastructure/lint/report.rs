//! Human readable lint report

use std::fmt::Write as _;
use std::path::Path;

use crate::domain::ports::{FileLintResult, Severity};

const ERROR_SYMBOL: &str = "✖";
const WARNING_SYMBOL: &str = "⚠";

/// Format results grouped per file, paths shown relative to `cwd`.
///
/// Returns an empty string when no file has warnings.
pub fn format_report(results: &[FileLintResult], cwd: &Path) -> String {
    let mut out = String::new();
    let mut errors = 0;
    let mut warnings = 0;

    for result in results.iter().filter(|r| !r.warnings.is_empty()) {
        let display = result
            .source
            .strip_prefix(cwd)
            .unwrap_or(&result.source)
            .display();
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "{display}");

        let positions: Vec<String> = result
            .warnings
            .iter()
            .map(|w| format!("{}:{}", w.line, w.column))
            .collect();
        let position_width = positions.iter().map(String::len).max().unwrap_or(0);
        let text_width = result
            .warnings
            .iter()
            .map(|w| w.text.chars().count())
            .max()
            .unwrap_or(0);

        for (warning, position) in result.warnings.iter().zip(&positions) {
            let symbol = match warning.severity {
                Severity::Error => {
                    errors += 1;
                    ERROR_SYMBOL
                }
                Severity::Warning => {
                    warnings += 1;
                    WARNING_SYMBOL
                }
            };
            let _ = writeln!(
                out,
                "  {position:<position_width$}  {symbol}  {:<text_width$}  {}",
                warning.text, warning.rule
            );
        }
    }

    if errors + warnings == 0 {
        return String::new();
    }

    let _ = write!(
        out,
        "\n{} ({}, {})",
        plural(errors + warnings, "problem"),
        plural(errors, "error"),
        plural(warnings, "warning")
    );
    out
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::LintWarning;
    use std::path::PathBuf;

    fn warning(line: usize, column: usize, rule: &str, severity: Severity, text: &str) -> LintWarning {
        LintWarning {
            line,
            column,
            rule: rule.to_string(),
            severity,
            text: text.to_string(),
        }
    }

    #[test]
    fn clean_results_produce_no_output() {
        let results = vec![FileLintResult {
            source: PathBuf::from("/p/a.scss"),
            warnings: Vec::new(),
            errored: false,
        }];
        assert_eq!(format_report(&results, Path::new("/p")), "");
    }

    #[test]
    fn report_groups_by_file() {
        let results = vec![FileLintResult {
            source: PathBuf::from("/p/scss/app.scss"),
            warnings: vec![
                warning(2, 14, "declaration-no-important", Severity::Error, "Unexpected !important"),
                warning(10, 1, "no-eol-whitespace", Severity::Warning, "Unexpected whitespace at end of line"),
            ],
            errored: true,
        }];

        insta::assert_snapshot!(format_report(&results, Path::new("/p")), @r"
        scss/app.scss
          2:14  ✖  Unexpected !important                 declaration-no-important
          10:1  ⚠  Unexpected whitespace at end of line  no-eol-whitespace

        2 problems (1 error, 1 warning)
        ");
    }
}
