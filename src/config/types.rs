//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::application::{BuildOptions, DEFAULT_BROWSERS, DEFAULT_PACKAGE_DIR};
use crate::error::KabaResult;

use super::loader::{self, ConfigWarning};

/// Output directory used when neither the entry nor `[build]` names one
pub const DEFAULT_OUT_DIR: &str = "build/css";

/// `[build]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub debug: bool,
    pub lint: bool,
    pub fix: bool,
    pub source_maps: bool,
    /// Default output directory for entries without their own
    pub out_dir: PathBuf,
    pub browsers: Vec<String>,
    pub package_dirs: Vec<PathBuf>,
    /// Lint rule file (YAML); the built-in rules are used when unset
    pub lint_config: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            debug: false,
            lint: false,
            fix: false,
            source_maps: true,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            browsers: DEFAULT_BROWSERS.iter().map(|b| b.to_string()).collect(),
            package_dirs: vec![PathBuf::from(DEFAULT_PACKAGE_DIR)],
            lint_config: None,
        }
    }
}

/// One `[[entries]]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryConfig {
    pub src: PathBuf,
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
    #[serde(default)]
    pub out_file: Option<String>,
}

/// Project configuration (`kaba-scss.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub entries: Vec<EntryConfig>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> KabaResult<Self> {
        Ok(loader::load_with_warnings(path)?.0)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys)
    pub fn load_with_warnings(path: &Path) -> KabaResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(cwd: &Path) -> Self {
        loader::load_or_default(cwd)
    }

    /// Apply `KABA_SCSS_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Output directory for an entry
    pub fn out_dir_for<'a>(&'a self, entry: &'a EntryConfig) -> &'a Path {
        entry.out_dir.as_deref().unwrap_or(self.build.out_dir.as_path())
    }

    /// Build options rooted at `cwd`
    pub fn build_options(&self, cwd: &Path) -> BuildOptions {
        BuildOptions::new(cwd)
            .with_debug(self.build.debug)
            .with_lint(self.build.lint)
            .with_fix(self.build.fix)
            .with_source_maps(self.build.source_maps)
            .with_browsers(self.build.browsers.clone())
            .with_package_dirs(self.build.package_dirs.clone())
            .with_lint_config(self.build.lint_config.clone())
    }
}
