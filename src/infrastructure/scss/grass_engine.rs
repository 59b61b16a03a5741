//! SCSS engine backed by `grass`

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use grass::{Options, OutputStyle};
use regex::Regex;

use crate::domain::ports::{CompileRequest, CompiledScss, ScssEngine};
use crate::domain::services::ImportResolver;
use crate::error::CompileError;

/// Transpiles SCSS with grass, resolving `~` package imports on the fly
#[derive(Debug, Clone, Default)]
pub struct GrassEngine {
    resolver: ImportResolver,
}

impl GrassEngine {
    pub fn new(resolver: ImportResolver) -> Self {
        Self { resolver }
    }
}

impl ScssEngine for GrassEngine {
    fn compile(&self, request: &CompileRequest) -> Result<CompiledScss, CompileError> {
        let fs = RecordingFs {
            entry: &request.source_path,
            entry_source: &request.source,
            resolver: &self.resolver,
            reads: Mutex::new(Vec::new()),
        };

        let mut load_paths = Vec::with_capacity(request.include_paths.len() + 1);
        if let Some(dir) = request.source_path.parent() {
            load_paths.push(dir.to_path_buf());
        }
        load_paths.extend(request.include_paths.iter().cloned());

        let options = Options::default()
            .fs(&fs)
            .load_paths(&load_paths)
            .style(OutputStyle::Expanded);

        let css = grass::from_path(&request.source_path, &options)
            .map_err(|e| parse_diagnostic(&e.to_string(), &request.source_path))?;

        Ok(CompiledScss {
            css,
            map: None,
            included_files: fs.included_files(),
        })
    }
}

/// `grass::Fs` adapter that serves the already-read entry source, rewrites
/// package imports in every stylesheet it hands out and records what was read
struct RecordingFs<'a> {
    entry: &'a Path,
    entry_source: &'a str,
    resolver: &'a ImportResolver,
    reads: Mutex<Vec<PathBuf>>,
}

impl RecordingFs<'_> {
    /// Files read so far, entry first, without duplicates
    fn included_files(&self) -> Vec<PathBuf> {
        let mut files = vec![self.entry.to_path_buf()];
        if let Ok(reads) = self.reads.lock() {
            for path in reads.iter() {
                if !files.contains(path) {
                    files.push(path.clone());
                }
            }
        }
        files
    }
}

impl std::fmt::Debug for RecordingFs<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingFs")
            .field("entry", &self.entry)
            .field("reads", &self.reads.lock().map(|r| r.len()).unwrap_or(0))
            .finish()
    }
}

impl grass::Fs for RecordingFs<'_> {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path == self.entry || path.is_file()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        if let Ok(mut reads) = self.reads.lock() {
            reads.push(path.to_path_buf());
        }

        if path == self.entry {
            return Ok(self.resolver.rewrite_imports(self.entry_source).into_owned().into_bytes());
        }

        let bytes = std::fs::read(path)?;
        let is_stylesheet = path
            .extension()
            .is_some_and(|ext| ext == "scss" || ext == "sass");
        if !is_stylesheet {
            return Ok(bytes);
        }
        match String::from_utf8(bytes) {
            Ok(text) => Ok(self.resolver.rewrite_imports(&text).into_owned().into_bytes()),
            Err(e) => Ok(e.into_bytes()),
        }
    }
}

/// grass trace line: `<file>:<line>:<col>`
fn grass_trace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\S.*?):(\d+):(\d+)\s*$")
            .unwrap_or_else(|e| panic!("invalid trace pattern: {e}"))
    })
}

/// dart-sass trace line: `<file> <line>:<col>  <frame>`
fn dart_trace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\S.*?) (\d+):(\d+)(?:\s|$)")
            .unwrap_or_else(|e| panic!("invalid trace pattern: {e}"))
    })
}

/// Turn grass's rendered diagnostic into a structured error.
///
/// The rendering is `Error: <message>`, a code frame drawn with box
/// characters, then the location as `<file>:<line>:<col>`. grass prefixes
/// the file with `./`, also for absolute paths. The dart-sass trace form is
/// accepted as well.
pub fn parse_diagnostic(rendered: &str, fallback_file: &Path) -> CompileError {
    let mut lines = rendered.lines();
    let first = lines.next().unwrap_or_default();
    let message = first.strip_prefix("Error: ").unwrap_or(first).to_string();

    let trace: Vec<&str> = rendered
        .lines()
        .skip(1)
        .filter(|line| !line.contains(['│', '╷', '╵', '┌', '└']))
        .collect();
    let location = trace
        .iter()
        .find_map(|line| grass_trace_regex().captures(line))
        .or_else(|| trace.iter().find_map(|line| dart_trace_regex().captures(line)));

    let (file, line, column) = match location {
        Some(caps) => (
            trace_file(&caps[1]),
            caps[2].parse().unwrap_or(0),
            caps[3].parse().unwrap_or(0),
        ),
        None => (fallback_file.to_path_buf(), 0, 0),
    };

    CompileError {
        file,
        line,
        column,
        message,
        formatted: (rendered.lines().count() > 1).then(|| rendered.to_string()),
    }
}

/// `.//tmp/app.scss` -> `/tmp/app.scss`, `./scss/app.scss` -> `scss/app.scss`
fn trace_file(raw: &str) -> PathBuf {
    PathBuf::from(raw.strip_prefix("./").unwrap_or(raw))
}
