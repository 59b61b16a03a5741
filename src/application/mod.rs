//! Application Layer
//!
//! Orchestrates the build flow on top of the domain ports.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain engine logic (that lives in Infrastructure)
//! - Contains failures per entry and turns them into outcomes
//!
//! ## Parts
//!
//! - `Compiler` - Pipeline stage executor for one entry
//! - `KabaScss` - Build session: registry, aggregate build driver, watch lifecycle
//! - `WatchUseCase` - Debounced change loop driving lint passes and rebuilds

pub mod compiler;
pub mod options;
pub mod session;
pub mod watch;

pub use compiler::{Compiler, Toolchain};
pub use options::{BuildOptions, DEFAULT_BROWSERS, DEFAULT_PACKAGE_DIR};
pub use session::KabaScss;
pub use watch::{WatchCycle, WatchUseCase, WatcherState, DEBOUNCE_MS};
