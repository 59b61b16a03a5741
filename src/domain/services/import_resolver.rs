//! Package import resolution
//!
//! An import URL starting with `~` names a file inside an installed package
//! (`~bootstrap/scss/mixins`) instead of a path relative to the importing file.
//! Resolution tries an ordered list of candidates against every package
//! directory and the first existing file wins.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// One way of turning an import request into a file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// `pkg/_foo.scss`
    PartialScss,
    /// `pkg/_foo.css`, contents inlined
    PartialCss,
    /// `pkg/foo.scss`
    Scss,
    /// `pkg/foo.css`, contents inlined
    Css,
    /// `pkg/foo` as written
    Literal,
}

impl Candidate {
    /// Resolution order, first match wins
    pub const ORDER: [Candidate; 5] = [
        Candidate::PartialScss,
        Candidate::PartialCss,
        Candidate::Scss,
        Candidate::Css,
        Candidate::Literal,
    ];

    /// Build the candidate path for a package-relative request
    pub fn path_for(self, request: &Path) -> Option<PathBuf> {
        let file_name = request.file_name()?.to_string_lossy();
        let name = match self {
            Candidate::PartialScss => format!("_{file_name}.scss"),
            Candidate::PartialCss => format!("_{file_name}.css"),
            Candidate::Scss => format!("{file_name}.scss"),
            Candidate::Css => format!("{file_name}.css"),
            Candidate::Literal => return Some(request.to_path_buf()),
        };
        Some(request.with_file_name(name))
    }

    /// Whether a match is inlined as plain CSS instead of imported by path
    fn inlines(self, path: &Path) -> bool {
        match self {
            Candidate::PartialCss | Candidate::Css => true,
            Candidate::Literal => path.extension().is_some_and(|ext| ext == "css"),
            Candidate::PartialScss | Candidate::Scss => false,
        }
    }
}

/// A resolved package import
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedImport {
    /// Import this file by path
    File(PathBuf),
    /// Plain CSS file whose contents replace the import statement
    Inline { path: PathBuf, contents: String },
}

impl ResolvedImport {
    pub fn path(&self) -> &Path {
        match self {
            ResolvedImport::File(path) => path,
            ResolvedImport::Inline { path, .. } => path,
        }
    }
}

/// Resolves `~` imports against a list of package directories
#[derive(Debug, Clone, Default)]
pub struct ImportResolver {
    package_dirs: Vec<PathBuf>,
}

impl ImportResolver {
    pub fn new(package_dirs: Vec<PathBuf>) -> Self {
        Self { package_dirs }
    }

    pub fn package_dirs(&self) -> &[PathBuf] {
        &self.package_dirs
    }

    /// Candidate paths for a `~` URL in resolution order.
    ///
    /// Returns an empty list for URLs without the `~` prefix.
    pub fn candidates(&self, url: &str) -> Vec<(Candidate, PathBuf)> {
        let Some(request) = url.strip_prefix('~') else {
            return Vec::new();
        };
        let request = request.trim_start_matches('/');
        if request.is_empty() {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        for candidate in Candidate::ORDER {
            for dir in &self.package_dirs {
                if let Some(path) = candidate.path_for(&dir.join(request)) {
                    candidates.push((candidate, path));
                }
            }
        }
        candidates
    }

    /// Resolve a `~` URL, `None` if it is not a package URL or nothing exists
    pub fn resolve(&self, url: &str) -> Option<ResolvedImport> {
        for (candidate, path) in self.candidates(url) {
            if !path.is_file() {
                continue;
            }
            if candidate.inlines(&path) {
                // An unreadable CSS file falls through to the next candidate
                if let Ok(contents) = std::fs::read_to_string(&path) {
                    return Some(ResolvedImport::Inline { path, contents });
                }
                continue;
            }
            return Some(ResolvedImport::File(path));
        }
        None
    }

    /// Rewrite every single-URL `@import`, `@use` and `@forward` of a `~` URL.
    ///
    /// Resolved stylesheets are referenced by absolute path, resolved plain CSS
    /// is inlined in place of an `@import`. Unresolved URLs are left as written
    /// so the SCSS engine reports them.
    pub fn rewrite_imports<'a>(&self, source: &'a str) -> Cow<'a, str> {
        if !source.contains("\"~") && !source.contains("'~") {
            return Cow::Borrowed(source);
        }

        package_import_regex().replace_all(source, |caps: &Captures<'_>| {
            let keyword = &caps[1];
            let url = &caps[3];
            let rest = &caps[4];

            match self.resolve(url) {
                Some(ResolvedImport::Inline { contents, .. })
                    if keyword == "import" && rest.trim().is_empty() =>
                {
                    contents
                }
                Some(resolved) => format!(
                    "@{keyword} \"{}\"{rest};",
                    sass_path(resolved.path())
                ),
                None => caps[0].to_string(),
            }
        })
    }
}

fn package_import_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"@(import|use|forward)\s+(["'])(~[^"']+)["']([^;]*);"#)
            .unwrap_or_else(|e| panic!("invalid import pattern: {e}"))
    })
}

/// Paths inside Sass strings always use forward slashes
fn sass_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
