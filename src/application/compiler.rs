//! Pipeline Stage Executor
//!
//! Runs one entry through read, transpile, post-process, lint, minify and
//! write. Every stage failure is logged and turned into a
//! [`CompilationOutcome`]; nothing escapes to sibling entries.

use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use crate::domain::entities::Entry;
use crate::domain::ports::{
    CompileRequest, CssTransformer, LintEngine, LintRequest, Minifier, ScssEngine,
    TransformRequest,
};
use crate::domain::services::{is_within, normalize_path, ImportResolver};
use crate::domain::value_objects::CompilationOutcome;
use crate::error::KabaResult;
use crate::infrastructure::css::{browser_targets, map_to_json};
use crate::infrastructure::{
    GrassEngine, LightningMinifier, LightningTransformer, LocalFs, RuleLinter,
};
use crate::logger::Logger;

use super::options::BuildOptions;

/// Directories whose files are never linted
const VENDOR_DIRS: [&str; 2] = ["node_modules", "vendor"];

/// The external engines a compiler drives
pub struct Toolchain {
    pub scss: Box<dyn ScssEngine>,
    pub transformer: Box<dyn CssTransformer>,
    pub linter: Box<dyn LintEngine>,
    pub minifier: Box<dyn Minifier>,
}

impl Toolchain {
    /// grass + lightningcss + the built-in rule linter
    pub fn native(options: &BuildOptions) -> KabaResult<Self> {
        let targets = browser_targets(&options.browsers)?;
        let resolver = ImportResolver::new(options.resolved_package_dirs());

        Ok(Self {
            scss: Box::new(GrassEngine::new(resolver)),
            transformer: Box::new(LightningTransformer::new(targets.clone())),
            linter: Box::new(RuleLinter::new(&options.cwd)),
            minifier: Box::new(LightningMinifier::new(targets)),
        })
    }
}

pub struct Compiler {
    options: BuildOptions,
    logger: Logger,
    toolchain: Toolchain,
    writer: LocalFs,
}

impl Compiler {
    pub fn new(options: BuildOptions, logger: Logger, toolchain: Toolchain) -> Self {
        let writer = LocalFs::new(options.debug && options.source_maps);
        Self {
            options,
            logger,
            toolchain,
            writer,
        }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Run the full pipeline for one entry
    pub fn compile(&self, entry: &Entry, lint: bool) -> CompilationOutcome {
        let start = Instant::now();

        let source = match std::fs::read_to_string(&entry.src) {
            Ok(source) => source,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.logger.log_skipped(&entry.src);
                return CompilationOutcome::Skipped;
            }
            Err(e) => {
                self.logger.log_error("File load error", &e);
                return CompilationOutcome::Failed;
            }
        };

        let compiled = match self.toolchain.scss.compile(&CompileRequest {
            source,
            source_path: entry.src.clone(),
            out_path: entry.out_file_path.clone(),
            source_map: self.options.source_maps,
            include_paths: self.options.resolved_package_dirs(),
        }) {
            Ok(compiled) => compiled,
            Err(error) => {
                self.logger.log_compile_error(&error);
                return CompilationOutcome::Failed;
            }
        };

        let processed = match self.toolchain.transformer.process(TransformRequest {
            css: &compiled.css,
            from: entry.relative_src.clone(),
            to: entry.out_file_path.clone(),
            prev_map: compiled.map,
            source_map: self.options.source_maps,
        }) {
            Ok(processed) => processed,
            Err(error) => {
                self.logger.log_error("Post-processing error", &error);
                return CompilationOutcome::Failed;
            }
        };
        for warning in &processed.warnings {
            self.logger
                .log_warning(&format!("CSS warning in {}", entry.basename), warning);
        }

        // Lint errors decide the outcome even when nothing is printed
        let mut lint_files = vec![entry.src.clone()];
        lint_files.extend(compiled.included_files);
        let has_lint_errors = self.lint_all(&lint_files, lint);

        let (css, map) = if self.options.debug {
            (processed.css, processed.map)
        } else {
            match self.toolchain.minifier.minify(TransformRequest {
                css: &processed.css,
                from: entry.out_file_path.clone(),
                to: entry.out_file_path.clone(),
                prev_map: processed.map,
                source_map: self.options.source_maps,
            }) {
                Ok(minified) => (minified.css, minified.map),
                Err(error) => {
                    self.logger.log_error("Minification error", &error);
                    return CompilationOutcome::Failed;
                }
            }
        };

        let map_json = match map {
            Some(mut map) => match map_to_json(&mut map) {
                Ok(json) => Some(json),
                Err(error) => {
                    self.logger.log_error("Source map error", &error);
                    return CompilationOutcome::Failed;
                }
            },
            None => None,
        };

        if let Err(error) = self.writer.write_output(entry, &css, map_json.as_deref()) {
            self.logger.log_error("Write error", &error);
            return CompilationOutcome::Failed;
        }

        self.logger
            .log_build_success(&entry.out_file_name, start.elapsed());

        if has_lint_errors {
            CompilationOutcome::LintErrors
        } else {
            CompilationOutcome::Clean
        }
    }

    /// Lint a single file and print the results, true when it has errors
    pub fn lint(&self, path: &Path) -> bool {
        self.lint_all(&[path.to_path_buf()], true)
    }

    fn lint_all(&self, files: &[PathBuf], print: bool) -> bool {
        let files = self.lintable_files(files);
        if files.is_empty() {
            return false;
        }

        let request = LintRequest {
            config_file: self.options.resolved_lint_config(),
            files,
            cache: true,
            fix: self.options.fix,
        };

        match self.toolchain.linter.lint(&request) {
            Ok(report) => {
                if (print || self.options.fix) && !report.output.is_empty() {
                    self.logger.log_tool_output(
                        &format!("Found {} lint issues:", report.warning_count()),
                        &report.output,
                    );
                }
                report.errored
            }
            Err(error) => {
                self.logger.log_error("Lint error", &error);
                true
            }
        }
    }

    /// Drop package references, vendored files and anything outside the
    /// working directory; keep first occurrences only
    fn lintable_files(&self, files: &[PathBuf]) -> Vec<PathBuf> {
        let mut lintable: Vec<PathBuf> = Vec::new();
        for file in files {
            if file.to_string_lossy().starts_with('~') {
                continue;
            }
            let path = normalize_path(&self.options.cwd.join(file));
            if is_vendored(&path) || !is_within(&path, &self.options.cwd) {
                continue;
            }
            if !lintable.contains(&path) {
                lintable.push(path);
            }
        }
        lintable
    }
}

fn is_vendored(path: &Path) -> bool {
    path.components().any(|c| match c {
        Component::Normal(name) => VENDOR_DIRS.iter().any(|v| name == *v),
        _ => false,
    })
}
