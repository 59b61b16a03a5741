//! In-memory lint result cache
//!
//! Results are keyed by path and stay valid while both the file content and
//! the rule configuration hash match.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::ports::LintWarning;
use crate::domain::value_objects::ContentHash;

#[derive(Debug, Clone)]
struct CachedResult {
    content: ContentHash,
    config: ContentHash,
    warnings: Vec<LintWarning>,
}

#[derive(Debug, Default)]
pub struct LintCache {
    entries: Mutex<HashMap<PathBuf, CachedResult>>,
}

impl LintCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &self,
        path: &Path,
        content: &ContentHash,
        config: &ContentHash,
    ) -> Option<Vec<LintWarning>> {
        let entries = self.entries.lock().ok()?;
        entries
            .get(path)
            .filter(|cached| &cached.content == content && &cached.config == config)
            .map(|cached| cached.warnings.clone())
    }

    pub fn insert(
        &self,
        path: &Path,
        content: ContentHash,
        config: ContentHash,
        warnings: Vec<LintWarning>,
    ) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                path.to_path_buf(),
                CachedResult {
                    content,
                    config,
                    warnings,
                },
            );
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_requires_matching_hashes() {
        let cache = LintCache::new();
        let path = Path::new("/p/a.scss");
        let content = ContentHash::from_content(".a{}");
        let config = ContentHash::from_content("rules: {}");

        cache.insert(path, content.clone(), config.clone(), Vec::new());
        assert_eq!(cache.get(path, &content, &config), Some(Vec::new()));

        let edited = ContentHash::from_content(".b{}");
        assert_eq!(cache.get(path, &edited, &config), None);

        let other_rules = ContentHash::from_content("rules: {x: 1}");
        assert_eq!(cache.get(path, &content, &other_rules), None);
    }

    #[test]
    fn insert_replaces_previous_result() {
        let cache = LintCache::new();
        let path = Path::new("/p/a.scss");
        let config = ContentHash::from_content("");

        cache.insert(path, ContentHash::from_content("1"), config.clone(), Vec::new());
        cache.insert(path, ContentHash::from_content("2"), config, Vec::new());
        assert_eq!(cache.len(), 1);
    }
}
