//! CSS Transformer port - post-processing (vendor prefixing, diagnostics)

use std::path::PathBuf;

use parcel_sourcemap::SourceMap;

use crate::error::KabaResult;

/// Input for one post-processing run
pub struct TransformRequest<'a> {
    pub css: &'a str,
    /// Source path recorded in the map
    pub from: PathBuf,
    /// Output path the map is written next to
    pub to: PathBuf,
    /// Map of the previous stage, merged into the new one
    pub prev_map: Option<SourceMap>,
    /// Whether to build a map at all
    pub source_map: bool,
}

/// Post-processed (or minified) CSS
pub struct ProcessedCss {
    pub css: String,
    pub map: Option<SourceMap>,
    /// Recoverable problems the transformer reported
    pub warnings: Vec<String>,
}

/// CSS post-processor
pub trait CssTransformer: Send + Sync {
    fn process(&self, request: TransformRequest<'_>) -> KabaResult<ProcessedCss>;
}
