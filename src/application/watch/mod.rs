//! Change Watch Loop
//!
//! Subscribes a [`FileWatcher`](crate::domain::ports::FileWatcher) to the
//! entries' source directories and turns debounced batches of changes into
//! lint passes plus one full rebuild.

mod state;
mod use_case;


pub use state::{WatcherState, DEBOUNCE_MS};
pub use use_case::{WatchCycle, WatchUseCase};
