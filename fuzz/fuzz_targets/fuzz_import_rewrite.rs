#![no_main]

use std::path::PathBuf;

use libfuzzer_sys::fuzz_target;

use kaba_scss::domain::services::ImportResolver;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        let resolver = ImportResolver::new(vec![PathBuf::from("/nonexistent/node_modules")]);
        let _ = resolver.rewrite_imports(source);
    }
});
