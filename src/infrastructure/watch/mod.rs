//! File-system watching

mod notify_watcher;

pub use notify_watcher::{NotifyWatcher, STARTUP_COOLDOWN_MS};
