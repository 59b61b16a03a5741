//! Configuration module for kaba-scss
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (KABA_SCSS_*)
//! 3. Project config (`kaba-scss.toml` in the working directory)
//! 4. User config (`<config dir>/kaba-scss/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{find_config_file, split_list, ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{BuildConfig, Config, EntryConfig, DEFAULT_OUT_DIR};
