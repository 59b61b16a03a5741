//! Domain Services
//!
//! Pure logic used by the pipeline, testable without the external engines.

mod import_resolver;
mod paths;

pub use import_resolver::{Candidate, ImportResolver, ResolvedImport};
pub use paths::{absolute_path, is_within, normalize_path};
