//! Session factory
//!
//! Resolves CLI flags, environment and config file into a ready
//! [`KabaScss`] session with every entry registered.

use std::path::{Path, PathBuf};

use crate::application::KabaScss;
use crate::config::{find_config_file, split_list, Config, ConfigWarning};
use crate::error::KabaResult;
use crate::logger::Logger;

use super::cli::Cli;

/// A configured session plus what was learned while loading its config
pub struct PreparedSession {
    pub session: KabaScss,
    /// Config file that was loaded, if any
    pub config_file: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Build a session from parsed CLI arguments
pub fn create_session(cli: &Cli, logger: Option<Logger>) -> KabaResult<PreparedSession> {
    let current_dir = std::env::current_dir()?;
    let cwd = match &cli.cwd {
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    let config_file = match &cli.config {
        Some(path) => Some(cwd.join(path)),
        None => find_config_file(&cwd),
    };
    let (config, warnings) = match &config_file {
        Some(path) => Config::load_with_warnings(path)?,
        None => (Config::default(), Vec::new()),
    };
    let config = config.with_env_overrides();

    let mut options = config
        .build_options(&cwd)
        .with_watch(cli.watch);
    if cli.debug {
        options = options.with_debug(true);
    }
    if cli.lint {
        options = options.with_lint(true);
    }
    if cli.fix {
        options = options.with_fix(true);
    }
    if cli.no_source_maps {
        options = options.with_source_maps(false);
    }
    if let Some(browsers) = &cli.browsers {
        let browsers = split_list(browsers);
        if !browsers.is_empty() {
            options = options.with_browsers(browsers);
        }
    }

    let mut session = KabaScss::new(options, logger)?;
    register_entries(&mut session, &config, cli);

    Ok(PreparedSession {
        session,
        config_file,
        warnings,
    })
}

/// Config entries first, then the positional ones
fn register_entries(session: &mut KabaScss, config: &Config, cli: &Cli) {
    for entry in &config.entries {
        session.add_entry(&entry.src, config.out_dir_for(entry), entry.out_file.as_deref());
    }

    let out_dir: &Path = cli.out_dir.as_deref().unwrap_or(&config.build.out_dir);
    for src in &cli.entries {
        session.add_entry(src, out_dir, None);
    }
}
