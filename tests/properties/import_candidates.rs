//! Property tests for `~` import candidates.

use std::path::PathBuf;

use proptest::prelude::*;

use kaba_scss::domain::services::ImportResolver;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: URLs without the `~` prefix are never treated as packages.
    #[test]
    fn property_plain_urls_have_no_candidates(
        url in "[A-Za-z0-9./_-]{0,48}",
    ) {
        let resolver = ImportResolver::new(vec![PathBuf::from("/nm")]);
        prop_assert!(resolver.candidates(&url).is_empty());
        prop_assert!(resolver.resolve(&url).is_none());
    }

    /// PROPERTY: every candidate lives inside a package directory.
    #[test]
    fn property_candidates_stay_in_package_dirs(
        request in "[a-z][a-z0-9_-]{0,10}(/[a-z][a-z0-9_-]{0,10}){0,3}",
    ) {
        let dirs = vec![PathBuf::from("/nm"), PathBuf::from("/vendor/pkgs")];
        let resolver = ImportResolver::new(dirs.clone());

        let candidates = resolver.candidates(&format!("~{request}"));
        prop_assert!(!candidates.is_empty());
        for (_, path) in candidates {
            prop_assert!(dirs.iter().any(|dir| path.starts_with(dir)), "{}", path.display());
        }
    }

    /// PROPERTY: rewriting never panics and leaves package-free sources untouched.
    #[test]
    fn property_rewrite_without_packages_is_identity(
        source in "(?s)[^~]{0,256}",
    ) {
        let resolver = ImportResolver::new(vec![PathBuf::from("/nm")]);
        let rewritten = resolver.rewrite_imports(&source);
        prop_assert_eq!(rewritten.as_ref(), source.as_str());
    }
}
