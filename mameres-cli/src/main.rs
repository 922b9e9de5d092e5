//! mameres CLI
//!
//! Converts MAME-compatible DAT files into the romset lookup listings read by
//! the frontend: `mamenames.xml`, `mamebioses.xml` and `mamedevices.xml`.

mod cli_types;
mod error;
mod logging;
mod settings;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use mameres_dat::{RomsetCatalog, parse_dat_file};
use mameres_frontend::{EmitOutcome, Provenance, write_listings};

use crate::cli_types::Cli;
use crate::error::CliError;
use crate::settings::Settings;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load();
    let out_dir = settings::resolve_output_dir(cli.output_dir, &settings);

    let catalog = build_catalog(&cli.dats);
    log::info!(
        "Found {} games, {} BIOSes and {} devices",
        catalog.game_count(),
        catalog.bios_count(),
        catalog.device_count(),
    );

    let provenance = Provenance::today(catalog.sources());
    for outcome in write_listings(&catalog, &out_dir, &provenance)? {
        match outcome {
            EmitOutcome::Written {
                kind,
                path,
                entries,
            } => {
                log::info!(
                    "{} Wrote {} {} to {}",
                    "\u{2714}".if_supports_color(Stderr, |t| t.green()),
                    entries,
                    kind.label(),
                    path.display(),
                );
            }
            EmitOutcome::Skipped { kind } => {
                log::info!(
                    "No {} found, skipped writing '{}'",
                    kind.label(),
                    kind.file_name()
                );
            }
        }
    }

    Ok(())
}

/// Read every DAT in argument order. Missing and unparseable files are
/// reported and skipped.
fn build_catalog(paths: &[PathBuf]) -> RomsetCatalog {
    let mut catalog = RomsetCatalog::new();

    for path in paths {
        log::info!("Reading file '{}'", path.display());
        if !path.is_file() {
            log::warn!("File {} not found, skipping", path.display());
            continue;
        }

        let doc = match parse_dat_file(path) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!(
                    "File {} cannot be parsed as XML ({e}), skipping",
                    path.display()
                );
                continue;
            }
        };

        let summary = catalog.ingest(&source_name(path), &doc);
        if !summary.skipped.is_empty() {
            log::warn!(
                "{} malformed record(s) skipped in {}",
                summary.skipped.len(),
                path.display()
            );
        }
    }

    catalog
}

/// Basename recorded in the provenance header.
fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
