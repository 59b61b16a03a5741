//! Test fixtures - reusable SCSS sources.

/// Lint-clean entry exercising variables, mixins and nesting
pub const SIMPLE_SCSS: &str = include_str!("../fixtures/simple.scss");

/// Entry importing a local partial and a `~` package partial
pub const APP_SCSS: &str = include_str!("../fixtures/scss/app.scss");

pub const VARIABLES_SCSS: &str = include_str!("../fixtures/scss/_variables.scss");

/// Package partial resolved through `~theme/buttons`
pub const THEME_BUTTONS_SCSS: &str = ".button {\n  border-radius: $radius;\n  user-select: none;\n}\n";

/// Entry with an empty block and an ID selector
pub const LINT_ERRORS_SCSS: &str = "#main {\n  .empty {}\n  color: red;\n}\n";

/// Entry that fails to compile
pub const BROKEN_SCSS: &str = ".a {\n  color: $undefined;\n}\n";
