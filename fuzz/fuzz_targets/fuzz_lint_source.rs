#![no_main]

use libfuzzer_sys::fuzz_target;

use kaba_scss::infrastructure::lint::{apply_fixes, lint_source, LintConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let Ok(config) = LintConfig::builtin() else {
            return;
        };
        let _ = lint_source(text, &config);
        let fixed = apply_fixes(text, &config);
        let _ = lint_source(&fixed, &config);
    }
});
