//! Local output writer
//!
//! Output files are written through a temp file in the target directory and
//! renamed into place, so a watcher or browser never sees a half-written file.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::entities::Entry;
use crate::error::{KabaError, KabaResult};

/// Create a directory and all of its parents
pub fn ensure_dir(path: &Path) -> KabaResult<()> {
    std::fs::create_dir_all(path).map_err(|source| KabaError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Delete a directory tree, a missing directory is not an error
pub fn clean_dir(path: &Path) -> KabaResult<()> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(KabaError::Write {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Atomically replace `path` with `content`
pub fn write_atomic(path: &Path, content: &[u8]) -> KabaResult<()> {
    let write_error = |source: std::io::Error| KabaError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
    temp.write_all(content).map_err(write_error)?;
    temp.flush().map_err(write_error)?;
    temp.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}

/// Writes an entry's CSS and source map
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs {
    /// Append a `sourceMappingURL` comment pointing at the map
    pub annotate: bool,
}

impl LocalFs {
    pub fn new(annotate: bool) -> Self {
        Self { annotate }
    }

    /// CSS as written to disk, with the map annotation when enabled
    pub fn css_contents(&self, entry: &Entry, css: &str, has_map: bool) -> String {
        if self.annotate && has_map {
            let separator = if css.ends_with('\n') || css.is_empty() { "" } else { "\n" };
            format!(
                "{css}{separator}/*# sourceMappingURL={} */\n",
                entry.map_file_name()
            )
        } else {
            css.to_string()
        }
    }

    /// Ensure the output directory exists, then write CSS and map concurrently
    pub fn write_output(&self, entry: &Entry, css: &str, map: Option<&str>) -> KabaResult<()> {
        ensure_dir(&entry.out_dir)?;
        let css = self.css_contents(entry, css, map.is_some());

        std::thread::scope(|scope| {
            let map_write =
                map.map(|map| scope.spawn(move || write_atomic(&entry.map_file_path, map.as_bytes())));
            let css_result = write_atomic(&entry.out_file_path, css.as_bytes());

            let map_result = match map_write {
                Some(handle) => handle
                    .join()
                    .unwrap_or_else(|_| Err(KabaError::Write {
                        path: entry.map_file_path.clone(),
                        source: std::io::Error::other("map writer thread panicked"),
                    })),
                None => Ok(()),
            };
            css_result.and(map_result)
        })
    }
}
