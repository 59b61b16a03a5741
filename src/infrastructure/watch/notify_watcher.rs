//! File watcher backed by `notify`

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;

use glob::Pattern;
use notify::event::{ModifyKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::ports::{FileEvent, FileEventKind, FileWatcher, WatchRequest};
use crate::error::{KabaError, KabaResult};

/// Default startup cooldown
pub const STARTUP_COOLDOWN_MS: u64 = 250;

/// Recursive watch over every requested directory, reporting only paths that
/// match one of the request's glob patterns.
///
/// Some backends report events for files that already exist when a watch is
/// registered, so events are dropped until a short cooldown has passed.
pub struct NotifyWatcher {
    watcher: Option<RecommendedWatcher>,
    cooldown: Duration,
}

impl NotifyWatcher {
    pub fn new() -> Self {
        Self {
            watcher: None,
            cooldown: Duration::from_millis(STARTUP_COOLDOWN_MS),
        }
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn is_active(&self) -> bool {
        self.watcher.is_some()
    }
}

impl Default for NotifyWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FileWatcher for NotifyWatcher {
    fn subscribe(&mut self, request: &WatchRequest, events: Sender<FileEvent>) -> KabaResult<()> {
        let patterns = request
            .patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| KabaError::Watch(format!("invalid watch pattern: {e}")))?;

        let armed = Arc::new(AtomicBool::new(false));
        let accepting = Arc::clone(&armed);

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if !accepting.load(Ordering::SeqCst) {
                    return;
                }
                let Ok(event) = res else {
                    return;
                };
                let Some(kind) = event_kind(&event.kind) else {
                    return;
                };
                for path in event.paths {
                    if matches_any(&patterns, &path) {
                        let _ = events.send(FileEvent::new(kind, path));
                    }
                }
            },
            Config::default(),
        )?;

        for dir in &request.dirs {
            if dir.is_dir() {
                watcher.watch(dir, RecursiveMode::Recursive)?;
            }
        }

        // Startup cooldown
        std::thread::sleep(self.cooldown);
        armed.store(true, Ordering::SeqCst);

        self.watcher = Some(watcher);
        Ok(())
    }

    fn close(&mut self) {
        // Dropping the watcher releases every OS handle
        self.watcher = None;
    }
}

fn event_kind(kind: &EventKind) -> Option<FileEventKind> {
    match kind {
        EventKind::Create(_) => Some(FileEventKind::Add),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => Some(FileEventKind::Unlink),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => Some(FileEventKind::Add),
        EventKind::Modify(ModifyKind::Metadata(_)) => None,
        EventKind::Modify(_) => Some(FileEventKind::Change),
        EventKind::Remove(_) => Some(FileEventKind::Unlink),
        _ => None,
    }
}

fn matches_any(patterns: &[Pattern], path: &Path) -> bool {
    patterns.iter().any(|p| p.matches_path(path))
}
