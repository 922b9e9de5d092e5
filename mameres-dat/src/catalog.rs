//! Multi-file romset aggregation.
//!
//! Files are folded in the order given. Within a file, all `<game>` records
//! are merged before all `<machine>` records, each in document order. The
//! first description seen for a romset name is kept for the whole run.

use std::collections::{BTreeSet, HashMap};

use crate::classify::{Classification, classify};
use crate::dat::{DatDocument, ElementShape};
use crate::error::RecordError;

/// Running state for a conversion run.
#[derive(Debug, Clone, Default)]
pub struct RomsetCatalog {
    /// Romset name to escaped description.
    games: HashMap<String, String>,
    bioses: BTreeSet<String>,
    devices: BTreeSet<String>,
    /// Basenames of the files merged so far, in merge order.
    sources: Vec<String>,
}

/// Counts for one ingested file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub games_added: usize,
    /// Game records whose name was already known (the earlier description is kept).
    pub duplicate_games: usize,
    pub bioses: usize,
    pub devices: usize,
    /// Devices dropped because they have no ROMs.
    pub discarded_devices: usize,
    /// Records skipped because they are missing a name or description.
    pub skipped: Vec<RecordError>,
}

impl RomsetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one classified record. Returns `true` if it added something new.
    pub fn merge(&mut self, classification: Classification) -> bool {
        match classification {
            Classification::Bios(name) => self.bioses.insert(name),
            Classification::Device(name) => self.devices.insert(name),
            Classification::Game { name, description } => {
                if self.games.contains_key(&name) {
                    false
                } else {
                    self.games.insert(name, description);
                    true
                }
            }
        }
    }

    /// Classify and merge every record of a parsed file.
    ///
    /// `source` is the file's basename and is recorded for provenance.
    /// Malformed records are skipped with a warning; the rest of the file is
    /// still merged.
    pub fn ingest(&mut self, source: &str, doc: &DatDocument) -> IngestSummary {
        self.sources.push(source.to_string());
        let mut summary = IngestSummary::default();

        for shape in [ElementShape::Game, ElementShape::Machine] {
            for record in doc.records(shape) {
                let classification = match classify(shape, record) {
                    Ok(Some(c)) => c,
                    Ok(None) => {
                        summary.discarded_devices += 1;
                        continue;
                    }
                    Err(e) => {
                        log::warn!("Skipping malformed record in {source}: {e}");
                        summary.skipped.push(e);
                        continue;
                    }
                };

                match &classification {
                    Classification::Bios(_) => summary.bioses += 1,
                    Classification::Device(_) => summary.devices += 1,
                    Classification::Game { name, .. } => {
                        if self.games.contains_key(name) {
                            summary.duplicate_games += 1;
                        } else {
                            summary.games_added += 1;
                        }
                    }
                }
                self.merge(classification);
            }
        }

        log::debug!(
            "{source}: {} games added ({} duplicates), {} BIOS records, {} device records, {} skipped",
            summary.games_added,
            summary.duplicate_games,
            summary.bioses,
            summary.devices,
            summary.skipped.len(),
        );
        summary
    }

    /// Escaped description recorded for `name`, if it is a known game.
    pub fn description(&self, name: &str) -> Option<&str> {
        self.games.get(name).map(String::as_str)
    }

    /// All games as `(name, escaped description)`, sorted by name.
    pub fn games_sorted(&self) -> Vec<(&str, &str)> {
        let mut games: Vec<(&str, &str)> = self
            .games
            .iter()
            .map(|(name, desc)| (name.as_str(), desc.as_str()))
            .collect();
        games.sort_unstable_by(|a, b| a.0.cmp(b.0));
        games
    }

    /// BIOS romset names, sorted and unique.
    pub fn bioses(&self) -> impl Iterator<Item = &str> {
        self.bioses.iter().map(String::as_str)
    }

    /// Device romset names, sorted and unique.
    pub fn devices(&self) -> impl Iterator<Item = &str> {
        self.devices.iter().map(String::as_str)
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    pub fn bios_count(&self) -> usize {
        self.bioses.len()
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty() && self.bioses.is_empty() && self.devices.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
