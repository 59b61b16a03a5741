//! Rule-based SCSS linter

use std::path::{Path, PathBuf};

use crate::domain::ports::{FileLintResult, LintEngine, LintReport, LintRequest, LintWarning, Severity};
use crate::domain::value_objects::ContentHash;
use crate::error::{KabaError, KabaResult};
use crate::infrastructure::fs::write_atomic;

use super::cache::LintCache;
use super::config::LintConfig;
use super::report::format_report;
use super::rules::{Rule, Source};

/// Lints files against the configured rule set.
///
/// Fixable rules are applied in a fixed order before analysis so the report
/// only lists what is left.
#[derive(Debug)]
pub struct RuleLinter {
    cwd: PathBuf,
    cache: LintCache,
}

/// Whitespace goes last: dropping a semicolon can expose trailing blanks
const FIX_ORDER: [Rule; 3] = [
    Rule::NoExtraSemicolons,
    Rule::ColorHexCase,
    Rule::NoEolWhitespace,
];

impl RuleLinter {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            cache: LintCache::new(),
        }
    }

    fn lint_file(
        &self,
        path: &Path,
        config: &LintConfig,
        request: &LintRequest,
    ) -> KabaResult<FileLintResult> {
        let mut text = std::fs::read_to_string(path)
            .map_err(|e| KabaError::Lint(format!("cannot read {}: {e}", path.display())))?;

        if request.fix {
            let fixed = apply_fixes(&text, config);
            if fixed != text {
                write_atomic(path, fixed.as_bytes())?;
                text = fixed;
            }
        }

        let content_hash = ContentHash::from_content(&text);
        let cached = if request.cache {
            self.cache.get(path, &content_hash, &config.fingerprint)
        } else {
            None
        };

        let warnings = match cached {
            Some(warnings) => warnings,
            None => {
                let warnings = lint_source(&text, config);
                if request.cache {
                    self.cache.insert(
                        path,
                        content_hash,
                        config.fingerprint.clone(),
                        warnings.clone(),
                    );
                }
                warnings
            }
        };

        Ok(FileLintResult {
            source: path.to_path_buf(),
            errored: warnings.iter().any(|w| w.severity == Severity::Error),
            warnings,
        })
    }
}

impl LintEngine for RuleLinter {
    fn lint(&self, request: &LintRequest) -> KabaResult<LintReport> {
        let config = LintConfig::load(request.config_file.as_deref())?;

        let mut results = Vec::new();
        for path in &request.files {
            // Deleted between event and lint
            if !path.is_file() {
                continue;
            }
            results.push(self.lint_file(path, &config, request)?);
        }

        Ok(LintReport {
            errored: results.iter().any(|r| r.errored),
            output: format_report(&results, &self.cwd),
            results,
        })
    }
}

/// Apply every enabled fixable rule
pub fn apply_fixes(text: &str, config: &LintConfig) -> String {
    FIX_ORDER
        .into_iter()
        .filter(|rule| config.get(*rule).is_some())
        .fold(text.to_string(), |text, rule| rule.fix(&text))
}

/// Run every enabled rule, warnings sorted by position
pub fn lint_source(text: &str, config: &LintConfig) -> Vec<LintWarning> {
    let source = Source::new(text);
    let mut warnings: Vec<LintWarning> = config
        .rules
        .iter()
        .flat_map(|configured| {
            configured
                .rule
                .check(&source, configured.max)
                .into_iter()
                .map(|v| LintWarning {
                    line: v.line,
                    column: v.column,
                    rule: configured.rule.name().to_string(),
                    severity: configured.severity,
                    text: v.text,
                })
        })
        .collect();
    warnings.sort_by(|a, b| (a.line, a.column).cmp(&(b.line, b.column)));
    warnings
}
