//! File System Implementations
//!
//! Output directory management and atomic writes.

mod local;

pub use local::{clean_dir, ensure_dir, write_atomic, LocalFs};
