//! Build Options
//!
//! Supplied once when a build session is created and never changed afterwards.

use std::path::{Path, PathBuf};

use crate::domain::services::absolute_path;

/// Browser support queries used when none are configured
pub const DEFAULT_BROWSERS: [&str; 4] = ["> 0.5%", "last 2 versions", "Firefox ESR", "not dead"];

/// Package directory searched for `~` imports when none are configured
pub const DEFAULT_PACKAGE_DIR: &str = "node_modules";

/// Options for a build session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Skip minification and annotate the CSS with its map
    pub debug: bool,
    /// Keep running and rebuild on changes
    pub watch: bool,
    /// Print lint results
    pub lint: bool,
    /// Let the linter rewrite fixable violations
    pub fix: bool,
    /// Write `.map` files next to the CSS
    pub source_maps: bool,
    /// Working directory relative entry paths resolve against
    pub cwd: PathBuf,
    /// Browserslist queries for vendor prefixing
    pub browsers: Vec<String>,
    /// Directories searched for `~` package imports
    pub package_dirs: Vec<PathBuf>,
    /// Lint rule file, `None` for the built-in rules
    pub lint_config: Option<PathBuf>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

impl BuildOptions {
    /// Options rooted at `cwd`, made absolute against the process working
    /// directory
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            debug: false,
            watch: false,
            lint: false,
            fix: false,
            source_maps: true,
            cwd: absolute_path(&cwd.into()),
            browsers: DEFAULT_BROWSERS.iter().map(|b| b.to_string()).collect(),
            package_dirs: vec![PathBuf::from(DEFAULT_PACKAGE_DIR)],
            lint_config: None,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }

    pub fn with_lint(mut self, lint: bool) -> Self {
        self.lint = lint;
        self
    }

    pub fn with_fix(mut self, fix: bool) -> Self {
        self.fix = fix;
        self
    }

    pub fn with_source_maps(mut self, source_maps: bool) -> Self {
        self.source_maps = source_maps;
        self
    }

    pub fn with_browsers(mut self, browsers: Vec<String>) -> Self {
        self.browsers = browsers;
        self
    }

    pub fn with_package_dirs(mut self, package_dirs: Vec<PathBuf>) -> Self {
        self.package_dirs = package_dirs;
        self
    }

    pub fn with_lint_config(mut self, lint_config: Option<PathBuf>) -> Self {
        self.lint_config = lint_config;
        self
    }

    /// Package directories joined onto the working directory
    pub fn resolved_package_dirs(&self) -> Vec<PathBuf> {
        self.package_dirs.iter().map(|d| self.resolve(d)).collect()
    }

    /// Lint rule file joined onto the working directory
    pub fn resolved_lint_config(&self) -> Option<PathBuf> {
        self.lint_config.as_deref().map(|p| self.resolve(p))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }
}
