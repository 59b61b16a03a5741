//! kaba-scss CLI - SCSS build pipeline
//!
//! Usage: kaba-scss [ENTRY]... [--out-dir DIR] [--debug] [--watch] [--lint] [--fix]

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use kaba_scss::presentation::{create_session, print_config_warnings, Cli};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let prepared = create_session(&cli, None).context("failed to set up build")?;
    print_config_warnings(&prepared.warnings);

    let session = Arc::new(prepared.session);
    if session.entries().is_empty() {
        bail!("no entries to build: pass SCSS files or add [[entries]] to kaba-scss.toml");
    }

    if session.options().watch {
        let handle = session.clone();
        ctrlc::set_handler(move || handle.stop()).context("failed to set Ctrl+C handler")?;
    }

    let success = session.run()?;
    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
