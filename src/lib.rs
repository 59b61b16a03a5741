//! kaba-scss - SCSS to CSS build pipeline
//!
//! Compiles SCSS entries with grass, prefixes and minifies them with
//! lightningcss, lints the sources and writes CSS plus source maps. In watch
//! mode every change to a source directory triggers a full rebuild.
//!
//! ```no_run
//! use kaba_scss::{BuildOptions, KabaScss};
//!
//! let mut session = KabaScss::new(BuildOptions::new("."), None)?;
//! session.add_entry("scss/app.scss", "build/css", None);
//! let success = session.run()?;
//! # Ok::<(), kaba_scss::KabaError>(())
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod presentation;

// Re-exports for convenience
pub use application::{BuildOptions, Compiler, KabaScss, Toolchain};
pub use config::Config;
pub use domain::entities::{Entry, EntryRegistry};
pub use domain::ports::{FileEvent, FileEventKind, FileWatcher, LogSink, WatchRequest};
pub use domain::value_objects::{BuildReport, CompilationOutcome};
pub use error::{CompileError, KabaError, KabaResult};
pub use logger::{ConsoleSink, Logger, MemorySink};
