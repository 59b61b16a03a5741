//! Property tests for entry registration.

use std::path::Path;

use proptest::prelude::*;

use kaba_scss::EntryRegistry;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-]{1,12}").unwrap()
}

fn relative_dir() -> impl Strategy<Value = String> {
    (proptest::collection::vec(segment(), 1..=4), 0usize..=3)
        .prop_map(|(segments, slashes)| format!("{}{}", segments.join("/"), "/".repeat(slashes)))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: output directories never keep a trailing separator.
    #[test]
    fn property_out_dir_has_no_trailing_slash(
        out_dir in relative_dir(),
        name in segment(),
    ) {
        let mut registry = EntryRegistry::new("/project");
        let entry = registry.add_entry(format!("scss/{name}.scss"), &out_dir, None).clone();

        let rendered = entry.out_dir.to_string_lossy().into_owned();
        prop_assert!(!rendered.ends_with('/'), "{rendered}");
        let expected = Path::new("/project").join(out_dir.trim_end_matches('/'));
        prop_assert_eq!(
            entry.out_dir.as_path(),
            expected.as_path()
        );
    }

    /// PROPERTY: derived paths are consistent with each other.
    #[test]
    fn property_derived_paths(
        out_dir in relative_dir(),
        name in segment(),
        ext in prop_oneof![Just("scss"), Just("sass"), Just("css")],
    ) {
        let mut registry = EntryRegistry::new("/project");
        let entry = registry.add_entry(format!("{name}.{ext}"), &out_dir, None).clone();

        prop_assert_eq!(&entry.out_file_name, &format!("{name}.css"));
        prop_assert_eq!(&entry.out_file_path, &entry.out_dir.join(&entry.out_file_name));
        prop_assert_eq!(
            entry.map_file_path.to_string_lossy().into_owned(),
            format!("{}.map", entry.out_file_path.display())
        );
        prop_assert_eq!(entry.basename, format!("{name}.{ext}"));
    }

    /// PROPERTY: registration keeps every entry, in order, duplicates included.
    #[test]
    fn property_registration_is_append_only(
        names in proptest::collection::vec(segment(), 0..8),
    ) {
        let mut registry = EntryRegistry::new("/project");
        for name in &names {
            registry.add_entry(format!("{name}.scss"), "dist", None);
        }

        prop_assert_eq!(registry.len(), names.len());
        for (entry, name) in registry.all().iter().zip(&names) {
            prop_assert_eq!(&entry.basename, &format!("{name}.scss"));
        }
        prop_assert!(registry.out_dirs().len() <= 1);
    }
}
