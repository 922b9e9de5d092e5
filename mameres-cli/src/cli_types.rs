//! CLI type definitions.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "mameres")]
#[command(
    about = "Convert MAME-compatible DAT files into romset name, BIOS and device listings",
    long_about = None
)]
pub(crate) struct Cli {
    /// DAT files to read, in priority order (the first description found for a romset wins)
    #[arg(required = true, value_name = "DAT")]
    pub dats: Vec<PathBuf>,

    /// Directory to write the listings to (defaults to the settings file, then the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Only show warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable debug logging (per-file counts)
    #[arg(short, long)]
    pub verbose: bool,
}
