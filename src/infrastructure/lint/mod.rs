//! SCSS linting
//!
//! A small stylelint-style rule engine: YAML rule configuration, comment and
//! string aware rules, in-place fixing and an in-memory result cache.

mod cache;
mod config;
mod linter;
mod report;
mod rules;

pub use config::{ConfiguredRule, LintConfig, DEFAULT_RULES};
pub use linter::{apply_fixes, lint_source, RuleLinter};
pub use report::format_report;
pub use rules::Rule;
