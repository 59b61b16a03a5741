//! Entry entity - one compilation job
//!
//! An entry maps a single SCSS source file to a CSS output file (plus its map).
//! Entries are created by the `EntryRegistry` and never change afterwards.

use std::path::{Path, PathBuf};

/// A fully resolved compilation job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Absolute path of the SCSS source
    pub src: PathBuf,
    /// File name of the source (`app.scss`)
    pub basename: String,
    /// Source path relative to the working directory (used in log output)
    pub relative_src: PathBuf,
    /// Output directory, never with a trailing separator
    pub out_dir: PathBuf,
    /// Output file name (`app.css`)
    pub out_file_name: String,
    /// `out_dir/out_file_name`
    pub out_file_path: PathBuf,
    /// `out_file_path` + `.map`
    pub map_file_path: PathBuf,
}

impl Entry {
    /// Resolve an entry against a working directory.
    ///
    /// Relative `src` and `out_dir` are joined onto `cwd`. When no output
    /// file name is given it is derived from the source file name with the
    /// extension swapped to `.css`.
    pub fn resolve(
        cwd: &Path,
        src: impl AsRef<Path>,
        out_dir: impl AsRef<Path>,
        out_file_name: Option<&str>,
    ) -> Self {
        let src = cwd.join(src.as_ref());
        let out_dir = normalize_dir(&cwd.join(out_dir.as_ref()));

        let basename = src
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let out_file_name = match out_file_name {
            Some(name) => name.to_string(),
            None => output_file_name(&basename),
        };

        let out_file_path = out_dir.join(&out_file_name);
        let map_file_path = PathBuf::from(format!("{}.map", out_file_path.display()));
        let relative_src = src
            .strip_prefix(cwd)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| src.clone());

        Self {
            src,
            basename,
            relative_src,
            out_dir,
            out_file_name,
            out_file_path,
            map_file_path,
        }
    }

    /// Directory containing the source file
    pub fn src_dir(&self) -> &Path {
        self.src.parent().unwrap_or_else(|| Path::new("."))
    }

    /// File name of the source map (`app.css.map`)
    pub fn map_file_name(&self) -> String {
        format!("{}.map", self.out_file_name)
    }
}

/// Swap the source extension for `.css` (`app.scss` -> `app.css`, `theme` -> `theme.css`)
pub fn output_file_name(basename: &str) -> String {
    Path::new(basename)
        .with_extension("css")
        .to_string_lossy()
        .into_owned()
}

/// Drop trailing separators by rebuilding the path from its components
fn normalize_dir(dir: &Path) -> PathBuf {
    let normalized: PathBuf = dir.components().collect();
    if normalized.as_os_str().is_empty() {
        dir.to_path_buf()
    } else {
        normalized
    }
}
