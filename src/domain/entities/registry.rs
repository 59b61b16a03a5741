//! Entry registry
//!
//! Holds the ordered list of compilation jobs for one build session.
//! No duplicate detection: two entries with the same output path overwrite
//! each other's files.

use std::path::{Path, PathBuf};

use super::entry::Entry;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryRegistry {
    cwd: PathBuf,
    entries: Vec<Entry>,
}

impl EntryRegistry {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            entries: Vec::new(),
        }
    }

    /// Register a new entry and return the resolved record
    pub fn add_entry(
        &mut self,
        src: impl AsRef<Path>,
        out_dir: impl AsRef<Path>,
        out_file_name: Option<&str>,
    ) -> &Entry {
        let entry = Entry::resolve(&self.cwd, src, out_dir, out_file_name);
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn all(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Distinct output directories, in registration order
    pub fn out_dirs(&self) -> Vec<PathBuf> {
        distinct(self.entries.iter().map(|e| e.out_dir.clone()))
    }

    /// Distinct source directories, in registration order
    pub fn source_dirs(&self) -> Vec<PathBuf> {
        distinct(self.entries.iter().map(|e| e.src_dir().to_path_buf()))
    }

    /// One `<dir>/**/*.scss` glob per distinct source directory
    pub fn watch_patterns(&self) -> Vec<String> {
        self.source_dirs()
            .iter()
            .map(|dir| {
                format!(
                    "{}/**/*.scss",
                    glob::Pattern::escape(&dir.to_string_lossy())
                )
            })
            .collect()
    }
}

fn distinct(items: impl Iterator<Item = PathBuf>) -> Vec<PathBuf> {
    let mut seen = Vec::new();
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}
