//! Build Session
//!
//! One [`KabaScss`] value owns the entry registry, the logger and the
//! compiler for a single build session. Several sessions can live in one
//! process; nothing here is global.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::entities::{Entry, EntryRegistry};
use crate::domain::ports::{FileWatcher, WatchRequest};
use crate::domain::value_objects::{BuildReport, CompilationOutcome};
use crate::error::KabaResult;
use crate::infrastructure::fs::clean_dir;
use crate::infrastructure::NotifyWatcher;
use crate::logger::Logger;

use super::compiler::{Compiler, Toolchain};
use super::options::BuildOptions;
use super::watch::{WatchCycle, WatchUseCase};

pub struct KabaScss {
    options: BuildOptions,
    logger: Logger,
    registry: EntryRegistry,
    compiler: Compiler,
    running: Arc<AtomicBool>,
    watching: AtomicBool,
    watcher: Mutex<Option<Box<dyn FileWatcher>>>,
}

impl KabaScss {
    /// Session with the native toolchain. Without a logger, output goes to
    /// the console.
    pub fn new(options: BuildOptions, logger: Option<Logger>) -> KabaResult<Self> {
        let toolchain = Toolchain::native(&options)?;
        Ok(Self::with_toolchain(options, logger, toolchain))
    }

    pub fn with_toolchain(
        options: BuildOptions,
        logger: Option<Logger>,
        toolchain: Toolchain,
    ) -> Self {
        let logger = logger.unwrap_or_else(Logger::console);
        let logger = if logger.has_cwd() {
            logger
        } else {
            logger.with_cwd(&options.cwd)
        };

        Self {
            registry: EntryRegistry::new(&options.cwd),
            compiler: Compiler::new(options.clone(), logger.clone(), toolchain),
            options,
            logger,
            running: Arc::new(AtomicBool::new(true)),
            watching: AtomicBool::new(false),
            watcher: Mutex::new(None),
        }
    }

    /// Use `watcher` instead of the notify watcher in watch mode
    pub fn with_watcher(self, watcher: Box<dyn FileWatcher>) -> Self {
        *self.watcher.lock().unwrap_or_else(|e| e.into_inner()) = Some(watcher);
        self
    }

    /// Register an entry. `out_file_name` defaults to the source name with a
    /// `.css` extension.
    pub fn add_entry(
        &mut self,
        src: impl AsRef<std::path::Path>,
        out_dir: impl AsRef<std::path::Path>,
        out_file_name: Option<&str>,
    ) -> &Entry {
        self.registry.add_entry(src, out_dir, out_file_name)
    }

    pub fn entries(&self) -> &[Entry] {
        self.registry.all()
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Clean every output directory, then compile all entries concurrently.
    ///
    /// Blocks until every entry has settled; one entry failing never stops
    /// the others.
    pub fn run_full_build(&self, lint: bool) -> BuildReport {
        self.logger.log_build_start();

        for dir in self.registry.out_dirs() {
            if let Err(error) = clean_dir(&dir) {
                self.logger.log_error("Clean error", &error);
            }
        }

        let compiler = &self.compiler;
        let outcomes: Vec<CompilationOutcome> = std::thread::scope(|scope| {
            let handles: Vec<_> = self
                .registry
                .all()
                .iter()
                .map(|entry| scope.spawn(move || compiler.compile(entry, lint)))
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or(CompilationOutcome::Failed))
                .collect()
        });

        let mut report = BuildReport::default();
        for (entry, outcome) in self.registry.all().iter().zip(outcomes) {
            report.push(entry.out_file_path.clone(), outcome);
        }
        report
    }

    /// Run one full build. In watch mode keep rebuilding on changes until
    /// [`stop`](Self::stop) is called.
    ///
    /// Returns `true` when every entry of the initial build compiled cleanly.
    pub fn run(&self) -> KabaResult<bool> {
        let report = self.run_full_build(self.options.lint);
        let success = report.is_success();

        if self.options.watch {
            self.watch()?;
        }
        Ok(success)
    }

    /// End a watch run. Calling it before the watch loop has started makes
    /// `run` return right after its initial build.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_watching(&self) -> bool {
        self.watching.load(Ordering::SeqCst)
    }

    fn watch(&self) -> KabaResult<()> {
        let mut watcher = self
            .watcher
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .unwrap_or_else(|| Box::new(NotifyWatcher::new()));

        let request = WatchRequest {
            dirs: self.registry.source_dirs(),
            patterns: self.registry.watch_patterns(),
            cwd: self.options.cwd.clone(),
        };
        self.logger.log_watch_started(&request.patterns);

        self.watching.store(true, Ordering::SeqCst);
        let result = WatchUseCase::new(request, self.options.lint).start(
            watcher.as_mut(),
            self.running.clone(),
            |path| {
                self.compiler.lint(path);
            },
            |_: &WatchCycle| {
                self.run_full_build(false);
            },
        );
        self.watching.store(false, Ordering::SeqCst);

        *self.watcher.lock().unwrap_or_else(|e| e.into_inner()) = Some(watcher);
        result.map(|_| ())
    }
}
