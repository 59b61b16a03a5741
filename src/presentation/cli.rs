//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Flags only ever switch options on; anything left unset falls back to the
//! environment, then the config file, then the defaults.

use std::path::PathBuf;

use clap::Parser;

/// kaba-scss - compile, prefix, lint and minify SCSS
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "kaba-scss")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Entries from kaba-scss.toml are built before the ones given here.")]
pub struct Cli {
    /// SCSS entry files
    #[arg(value_name = "ENTRY")]
    pub entries: Vec<PathBuf>,

    /// Output directory for the entries given on the command line
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Skip minification and annotate the CSS with its source map
    #[arg(short, long)]
    pub debug: bool,

    /// Rebuild whenever a source file changes
    #[arg(short, long)]
    pub watch: bool,

    /// Print lint results
    #[arg(short, long)]
    pub lint: bool,

    /// Fix lint violations in place where possible
    #[arg(long)]
    pub fix: bool,

    /// Working directory entries resolve against
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Config file (defaults to kaba-scss.toml in the working directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Comma-separated browserslist queries
    #[arg(long, value_name = "LIST")]
    pub browsers: Option<String>,

    /// Do not write .map files
    #[arg(long)]
    pub no_source_maps: bool,
}
