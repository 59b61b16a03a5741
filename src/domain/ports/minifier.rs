//! Minifier port

use crate::error::KabaResult;

use super::css_transformer::{ProcessedCss, TransformRequest};

/// CSS minifier; merges its map onto `prev_map` so the result still points
/// at the original sources
pub trait Minifier: Send + Sync {
    fn minify(&self, request: TransformRequest<'_>) -> KabaResult<ProcessedCss>;
}
