//! Watch loop

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::{FileWatcher, WatchRequest};
use crate::error::KabaResult;

use super::state::WatcherState;

/// How long one receive waits before re-checking the running flag
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// One rebuild cycle triggered by a batch of changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchCycle {
    /// Changed paths, sorted, each reported once
    pub changes: Vec<PathBuf>,
}

/// Runs rebuilds in response to file-system changes.
///
/// Builds run on the calling thread one at a time. Events that arrive while
/// a build is running queue up in the channel and are coalesced into the next
/// cycle, so two builds never race on the output directories.
pub struct WatchUseCase {
    request: WatchRequest,
    lint: bool,
    debounce: Option<Duration>,
}

impl WatchUseCase {
    pub fn new(request: WatchRequest, lint: bool) -> Self {
        Self {
            request,
            lint,
            debounce: None,
        }
    }

    /// Override the debounce period
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = Some(debounce);
        self
    }

    pub fn request(&self) -> &WatchRequest {
        &self.request
    }

    /// Subscribe and block until `running` is cleared.
    ///
    /// For every cycle `lint_file` runs once per changed path (when linting is
    /// on), then `rebuild` runs once. The watcher is closed before returning.
    pub fn start<L, R>(
        &self,
        watcher: &mut dyn FileWatcher,
        running: Arc<AtomicBool>,
        lint_file: L,
        mut rebuild: R,
    ) -> KabaResult<usize>
    where
        L: Fn(&Path),
        R: FnMut(&WatchCycle),
    {
        let (tx, rx) = channel();
        watcher.subscribe(&self.request, tx)?;

        let mut state = match self.debounce {
            Some(debounce) => WatcherState::with_debounce(debounce),
            None => WatcherState::new(),
        };
        let mut cycles = 0;

        while running.load(Ordering::SeqCst) {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(event) => state.add_change(event.path),
                Err(RecvTimeoutError::Timeout) => {}
                // The watcher dropped its sender; keep honoring the running flag
                Err(RecvTimeoutError::Disconnected) => std::thread::sleep(POLL_INTERVAL),
            }

            if state.should_sync() {
                let cycle = WatchCycle {
                    changes: state.take_changes(),
                };
                if self.lint {
                    for path in &cycle.changes {
                        lint_file(path);
                    }
                }
                rebuild(&cycle);
                cycles += 1;
            }
        }

        watcher.close();
        Ok(cycles)
    }
}
