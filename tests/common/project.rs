//! Isolated project directory for build tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Arc;

use tempfile::TempDir;

use kaba_scss::{BuildOptions, KabaScss, Logger, MemorySink};

/// Result of running the kaba-scss binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for TestResult {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Temporary project directory
pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Project with `fixtures/simple.scss`
    pub fn simple() -> Self {
        Self::new().with_file("fixtures/simple.scss", super::SIMPLE_SCSS)
    }

    pub fn with_file(self, relative: &str, contents: &str) -> Self {
        self.write(relative, contents);
        self
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("failed to read {relative}: {e}"))
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn dir(&self) -> &Path {
        self.root.path()
    }

    pub fn options(&self) -> BuildOptions {
        BuildOptions::new(self.dir())
    }

    /// Session that logs into memory
    pub fn session(&self, options: BuildOptions) -> (KabaScss, Arc<MemorySink>) {
        let (logger, sink) = Logger::memory();
        let session = KabaScss::new(options, Some(logger)).unwrap();
        (session, sink)
    }

    /// Run the binary with `--cwd` pointing at this project
    pub fn run_cli(&self, args: &[&str]) -> TestResult {
        Command::new(env!("CARGO_BIN_EXE_kaba-scss"))
            .arg("--cwd")
            .arg(self.dir())
            .args(args)
            .env_remove("KABA_SCSS_DEBUG")
            .env_remove("KABA_SCSS_LINT")
            .env_remove("KABA_SCSS_FIX")
            .env_remove("KABA_SCSS_BROWSERS")
            .env("XDG_CONFIG_HOME", self.path(".config"))
            .env("NO_COLOR", "1")
            .output()
            .unwrap()
            .into()
    }
}
