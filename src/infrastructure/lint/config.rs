//! Lint rule configuration (YAML)
//!
//! ```yaml
//! rules:
//!   declaration-no-important: error
//!   no-eol-whitespace: warning
//!   block-no-empty: off
//!   max-nesting-depth:
//!     severity: error
//!     max: 3
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::ports::Severity;
use crate::domain::value_objects::ContentHash;
use crate::error::{KabaError, KabaResult};

use super::rules::Rule;

/// Rule set shipped with the crate
pub const DEFAULT_RULES: &str = include_str!("default_rules.yml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RuleLevel {
    Off,
    Warning,
    Error,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RuleSetting {
    Level(RuleLevel),
    Detailed {
        severity: RuleLevel,
        #[serde(default)]
        max: Option<usize>,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleFile {
    #[serde(default)]
    rules: BTreeMap<String, RuleSetting>,
}

/// An enabled rule with its options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfiguredRule {
    pub rule: Rule,
    pub severity: Severity,
    /// Numeric option (`max` for limit rules)
    pub max: Option<usize>,
}

/// Parsed lint configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintConfig {
    pub rules: Vec<ConfiguredRule>,
    /// Hash of the configuration source, part of the cache key
    pub fingerprint: ContentHash,
}

impl LintConfig {
    /// Built-in rules
    pub fn builtin() -> KabaResult<Self> {
        Self::parse(DEFAULT_RULES, Path::new("<builtin>"))
    }

    /// Load from a rule file, or the built-in rules when `path` is `None`
    pub fn load(path: Option<&Path>) -> KabaResult<Self> {
        match path {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|e| KabaError::LintConfig {
                        file: path.to_path_buf(),
                        message: e.to_string(),
                    })?;
                Self::parse(&content, path)
            }
            None => Self::builtin(),
        }
    }

    /// Parse YAML rule configuration; `origin` is used in error messages
    pub fn parse(content: &str, origin: &Path) -> KabaResult<Self> {
        let config_error = |message: String| KabaError::LintConfig {
            file: PathBuf::from(origin),
            message,
        };

        let file: RuleFile =
            serde_yaml_ng::from_str(content).map_err(|e| config_error(e.to_string()))?;

        let mut rules = Vec::new();
        for (name, setting) in file.rules {
            let rule = Rule::from_name(&name)
                .ok_or_else(|| config_error(format!("unknown rule '{name}'")))?;

            let (level, max) = match setting {
                RuleSetting::Level(level) => (level, None),
                RuleSetting::Detailed { severity, max } => (severity, max),
            };

            let severity = match level {
                RuleLevel::Off => continue,
                RuleLevel::Warning => Severity::Warning,
                RuleLevel::Error => Severity::Error,
            };

            rules.push(ConfiguredRule {
                rule,
                severity,
                max: max.or(rule.default_max()),
            });
        }

        Ok(Self {
            rules,
            fingerprint: ContentHash::from_content(content),
        })
    }

    pub fn get(&self, rule: Rule) -> Option<&ConfiguredRule> {
        self.rules.iter().find(|r| r.rule == rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rules_parse() {
        let config = LintConfig::builtin().unwrap();
        assert_eq!(config.rules.len(), Rule::ALL.len());

        let depth = config.get(Rule::MaxNestingDepth).unwrap();
        assert_eq!(depth.max, Some(4));
        assert_eq!(depth.severity, Severity::Error);

        let eol = config.get(Rule::NoEolWhitespace).unwrap();
        assert_eq!(eol.severity, Severity::Warning);
    }

    #[test]
    fn off_rules_are_dropped() {
        let yaml = "rules:\n  block-no-empty: off\n  declaration-no-important: warning\n";
        let config = LintConfig::parse(yaml, Path::new("rules.yml")).unwrap();

        assert!(config.get(Rule::BlockNoEmpty).is_none());
        assert_eq!(
            config.get(Rule::DeclarationNoImportant).unwrap().severity,
            Severity::Warning
        );
    }

    #[test]
    fn detailed_setting_without_max_uses_default() {
        let yaml = "rules:\n  selector-max-id:\n    severity: warning\n";
        let config = LintConfig::parse(yaml, Path::new("rules.yml")).unwrap();
        assert_eq!(config.get(Rule::SelectorMaxId).unwrap().max, Some(0));
    }

    #[test]
    fn unknown_rule_is_rejected() {
        let yaml = "rules:\n  no-such-rule: error\n";
        let err = LintConfig::parse(yaml, Path::new("rules.yml")).unwrap_err();
        assert!(err.to_string().contains("unknown rule 'no-such-rule'"));
        assert!(err.to_string().contains("rules.yml"));
    }

    #[test]
    fn fingerprint_changes_with_content() {
        let a = LintConfig::parse("rules:\n  block-no-empty: error\n", Path::new("a")).unwrap();
        let b = LintConfig::parse("rules:\n  block-no-empty: warning\n", Path::new("b")).unwrap();
        assert_ne!(a.fingerprint, b.fingerprint);
    }

    #[test]
    fn missing_rule_file_is_config_error() {
        let err = LintConfig::load(Some(Path::new("/definitely/missing/rules.yml"))).unwrap_err();
        assert!(matches!(err, KabaError::LintConfig { .. }));
    }
}
