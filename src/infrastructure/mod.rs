//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `scss/` - SCSS transpilation (grass)
//! - `css/` - Post-processing and minification (lightningcss)
//! - `lint/` - Rule-based SCSS linter
//! - `fs/` - Output directories and atomic writes
//! - `watch/` - File-system watcher (notify)

pub mod css;
pub mod fs;
pub mod lint;
pub mod scss;
pub mod watch;

// Re-export for convenience
pub use css::{browser_targets, LightningMinifier, LightningTransformer};
pub use fs::LocalFs;
pub use lint::RuleLinter;
pub use scss::GrassEngine;
pub use watch::NotifyWatcher;
