//! Property tests for the rule linter.

use proptest::prelude::*;

use kaba_scss::infrastructure::lint::{apply_fixes, lint_source, LintConfig};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: linting arbitrary text never panics and every position is
    /// inside the text.
    #[test]
    fn property_lint_never_panics(
        text in "(?s).{0,512}",
    ) {
        let config = LintConfig::builtin().unwrap();
        let lines = text.split('\n').count();

        for warning in lint_source(&text, &config) {
            prop_assert!(warning.line >= 1 && warning.line <= lines);
            prop_assert!(warning.column >= 1);
        }
    }

    /// PROPERTY: SCSS-ish input never panics, warnings come out sorted.
    #[test]
    fn property_scss_like_input_sorted(
        text in "[a-z.#{}:; \n!0-9A-F/*\"]{0,256}",
    ) {
        let config = LintConfig::builtin().unwrap();
        let warnings = lint_source(&text, &config);

        let positions: Vec<_> = warnings.iter().map(|w| (w.line, w.column)).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        prop_assert_eq!(positions, sorted);
    }

    /// PROPERTY: fixing keeps line structure and removes trailing whitespace.
    #[test]
    fn property_fix_keeps_lines(
        text in "[a-z{}:; \t\n#A-F0-9]{0,256}",
    ) {
        let config = LintConfig::builtin().unwrap();
        let fixed = apply_fixes(&text, &config);

        prop_assert_eq!(fixed.matches('\n').count(), text.matches('\n').count());
        for line in fixed.lines() {
            prop_assert_eq!(line, line.trim_end());
        }
    }
}
