//! File Watcher port

use std::path::PathBuf;
use std::sync::mpsc::Sender;

use crate::error::KabaResult;

/// Kind of file-system change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEventKind {
    Add,
    Change,
    Unlink,
}

/// A change to a watched file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    pub kind: FileEventKind,
    pub path: PathBuf,
}

impl FileEvent {
    pub fn new(kind: FileEventKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// What to watch
#[derive(Debug, Clone)]
pub struct WatchRequest {
    /// Directories to watch recursively
    pub dirs: Vec<PathBuf>,
    /// Glob patterns a path must match to be reported
    pub patterns: Vec<String>,
    /// Working directory the subscription is scoped to
    pub cwd: PathBuf,
}

/// File-system subscription. Only changes after `subscribe` returns are
/// reported; `close` releases every OS watch handle.
pub trait FileWatcher: Send {
    fn subscribe(&mut self, request: &WatchRequest, events: Sender<FileEvent>) -> KabaResult<()>;

    fn close(&mut self);
}
