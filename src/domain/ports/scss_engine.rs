//! SCSS Engine port - SCSS to CSS transpilation
//!
//! The engine receives already-read source text plus enough path metadata to
//! resolve relative and `~` package imports.

use std::path::PathBuf;

use parcel_sourcemap::SourceMap;

use crate::error::CompileError;

/// Input for one transpilation
#[derive(Debug, Clone)]
pub struct CompileRequest {
    /// Source text of the entry file
    pub source: String,
    /// Path of the entry file (relative imports resolve against its directory)
    pub source_path: PathBuf,
    /// Path the CSS will be written to
    pub out_path: PathBuf,
    /// Whether the caller wants a source map
    pub source_map: bool,
    /// Additional import search directories
    pub include_paths: Vec<PathBuf>,
}

/// Output of a successful transpilation
#[derive(Debug)]
pub struct CompiledScss {
    pub css: String,
    /// `None` when the engine cannot produce maps
    pub map: Option<SourceMap>,
    /// Every file the engine loaded, entry first, no duplicates
    pub included_files: Vec<PathBuf>,
}

/// SCSS to CSS compiler
pub trait ScssEngine: Send + Sync {
    fn compile(&self, request: &CompileRequest) -> Result<CompiledScss, CompileError>;
}
