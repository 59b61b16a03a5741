//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{KabaError, KabaResult};

use super::types::Config;

/// Project configuration file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "kaba-scss.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> KabaResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| KabaError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Project config in `cwd`, else the user config, if either exists
pub fn find_config_file(cwd: &Path) -> Option<PathBuf> {
    let project_config = cwd.join(PROJECT_CONFIG_FILE);
    if project_config.is_file() {
        return Some(project_config);
    }

    user_config_dir()
        .map(|dir| dir.join("kaba-scss/config.toml"))
        .filter(|path| path.is_file())
}

/// Load from project config, user config, or defaults
pub fn load_or_default(cwd: &Path) -> Config {
    let config = find_config_file(cwd)
        .and_then(|path| Config::load(&path).ok())
        .unwrap_or_default();
    with_env_overrides(config)
}

/// Apply environment variable overrides (KABA_SCSS_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_impl(config, |key| std::env::var(key).ok())
}

fn with_env_overrides_impl<F>(mut config: Config, get_env: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = get_env("KABA_SCSS_DEBUG").and_then(|v| parse_bool(&v)) {
        config.build.debug = value;
    }
    if let Some(value) = get_env("KABA_SCSS_LINT").and_then(|v| parse_bool(&v)) {
        config.build.lint = value;
    }
    if let Some(value) = get_env("KABA_SCSS_FIX").and_then(|v| parse_bool(&v)) {
        config.build.fix = value;
    }

    // Comma-separated browserslist queries
    if let Some(browsers) = get_env("KABA_SCSS_BROWSERS") {
        let parsed = split_list(&browsers);
        if !parsed.is_empty() {
            config.build.browsers = parsed;
        }
    }

    config
}

/// Split a comma-separated list, dropping empty items
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// XDG config directory, falling back to the platform default
fn user_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "build",
        "entries",
        "debug",
        "lint",
        "fix",
        "source_maps",
        "out_dir",
        "browsers",
        "package_dirs",
        "lint_config",
        "src",
        "out_file",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
