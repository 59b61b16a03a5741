//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating the build session from flags, environment and config
//! - Console output outside the build log (config warnings)

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::Cli;
pub use factory::{create_session, PreparedSession};
pub use output::print_config_warnings;
