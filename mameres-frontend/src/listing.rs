use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use mameres_dat::RomsetCatalog;
use quick_xml::escape::partial_escape;

use crate::{FrontendError, Provenance};

/// The three lookup files produced for the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingKind {
    /// `mamenames.xml`: romset name to human-readable title.
    Names,
    /// `mamebioses.xml`
    Bioses,
    /// `mamedevices.xml`
    Devices,
}

impl ListingKind {
    pub const ALL: [ListingKind; 3] = [Self::Names, Self::Bioses, Self::Devices];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Names => "mamenames.xml",
            Self::Bioses => "mamebioses.xml",
            Self::Devices => "mamedevices.xml",
        }
    }

    /// Tag wrapping one entry of the listing.
    pub fn entry_tag(self) -> &'static str {
        match self {
            Self::Names => "game",
            Self::Bioses => "bios",
            Self::Devices => "device",
        }
    }

    /// Plural noun used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Self::Names => "games",
            Self::Bioses => "BIOSes",
            Self::Devices => "devices",
        }
    }
}

/// Result of emitting one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitOutcome {
    Written {
        kind: ListingKind,
        path: PathBuf,
        entries: usize,
    },
    /// Nothing of this kind was found, so no file was created.
    Skipped { kind: ListingKind },
}

impl EmitOutcome {
    pub fn kind(&self) -> ListingKind {
        match self {
            Self::Written { kind, .. } | Self::Skipped { kind } => *kind,
        }
    }
}

/// Render `mamenames.xml`. Descriptions must already be escaped.
pub fn render_names<'a>(
    games: impl IntoIterator<Item = (&'a str, &'a str)>,
    provenance: &Provenance,
) -> String {
    let mut xml = String::new();
    push_line(&mut xml, &provenance.to_string());
    for (name, description) in games {
        xml.push_str("<game>\n");
        xml.push_str("\t<mamename>");
        xml.push_str(&partial_escape(name));
        xml.push_str("</mamename>\n");
        xml.push_str("\t<realname>");
        xml.push_str(description);
        xml.push_str("</realname>\n");
        xml.push_str("</game>\n");
    }
    xml
}

/// Render a one-tag-per-line romset list (`mamebioses.xml` or `mamedevices.xml`).
pub fn render_romset_list<'a>(
    kind: ListingKind,
    names: impl IntoIterator<Item = &'a str>,
    provenance: &Provenance,
) -> String {
    let tag = kind.entry_tag();
    let mut xml = String::new();
    push_line(&mut xml, &provenance.to_string());
    for name in names {
        push_line(&mut xml, &format!("<{tag}>{}</{tag}>", partial_escape(name)));
    }
    xml
}

/// Render the listing of `kind`, or `None` when the catalog has nothing of that kind.
pub fn render_listing(
    kind: ListingKind,
    catalog: &RomsetCatalog,
    provenance: &Provenance,
) -> Option<(String, usize)> {
    let (rendered, entries) = match kind {
        ListingKind::Names => (
            render_names(catalog.games_sorted(), provenance),
            catalog.game_count(),
        ),
        ListingKind::Bioses => (
            render_romset_list(kind, catalog.bioses(), provenance),
            catalog.bios_count(),
        ),
        ListingKind::Devices => (
            render_romset_list(kind, catalog.devices(), provenance),
            catalog.device_count(),
        ),
    };
    (entries > 0).then_some((rendered, entries))
}

/// Write the listing of `kind` into `out_dir`, creating the directory if
/// needed. Empty listings are not created, and neither is the directory.
pub fn write_listing(
    kind: ListingKind,
    catalog: &RomsetCatalog,
    out_dir: &Path,
    provenance: &Provenance,
) -> Result<EmitOutcome, FrontendError> {
    let Some((xml, entries)) = render_listing(kind, catalog, provenance) else {
        return Ok(EmitOutcome::Skipped { kind });
    };

    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(kind.file_name());
    let mut file = fs::File::create(&path)?;
    file.write_all(xml.as_bytes())?;
    file.flush()?;

    Ok(EmitOutcome::Written {
        kind,
        path,
        entries,
    })
}

/// Write all three listings, one after the other.
pub fn write_listings(
    catalog: &RomsetCatalog,
    out_dir: &Path,
    provenance: &Provenance,
) -> Result<Vec<EmitOutcome>, FrontendError> {
    ListingKind::ALL
        .into_iter()
        .map(|kind| write_listing(kind, catalog, out_dir, provenance))
        .collect()
}

fn push_line(xml: &mut String, line: &str) {
    xml.push_str(line);
    xml.push('\n');
}

#[cfg(test)]
#[path = "tests/listing_tests.rs"]
mod tests;
