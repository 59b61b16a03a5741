//! Domain Value Objects

mod hash;
mod outcome;

pub use hash::ContentHash;
pub use outcome::{BuildReport, CompilationOutcome};
