//! Readers for the generated listings, as used by the frontend at runtime.

use std::io::BufRead;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::{FrontendError, ListingKind};

#[derive(Debug, Clone, Default)]
struct NamePair {
    mame_name: String,
    real_name: String,
}

#[derive(Clone, Copy)]
enum NameField {
    MameName,
    RealName,
}

/// Romset name to display title lookup, loaded from `mamenames.xml`.
#[derive(Debug, Clone, Default)]
pub struct MameNames {
    /// Sorted by `mame_name` for binary search.
    pairs: Vec<NamePair>,
}

impl MameNames {
    pub fn load(path: &Path) -> Result<Self, FrontendError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, FrontendError> {
        let mut xml = Reader::from_reader(reader);
        let mut buf = Vec::new();
        let mut pairs = Vec::new();
        let mut current: Option<NamePair> = None;
        let mut field: Option<NameField> = None;

        loop {
            match xml.read_event_into(&mut buf)? {
                Event::Start(ref e) => match e.name().as_ref() {
                    b"game" => current = Some(NamePair::default()),
                    b"mamename" => field = Some(NameField::MameName),
                    b"realname" => field = Some(NameField::RealName),
                    _ => {}
                },
                Event::Text(ref e) => {
                    if let (Some(pair), Some(field)) = (current.as_mut(), field) {
                        let text = e.unescape()?;
                        match field {
                            NameField::MameName => pair.mame_name.push_str(&text),
                            NameField::RealName => pair.real_name.push_str(&text),
                        }
                    }
                }
                Event::End(ref e) => match e.name().as_ref() {
                    b"game" => pairs.extend(current.take()),
                    b"mamename" | b"realname" => field = None,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        pairs.sort_by(|a: &NamePair, b: &NamePair| a.mame_name.cmp(&b.mame_name));
        Ok(Self { pairs })
    }

    /// Display title for `mame_name`, if listed.
    pub fn get(&self, mame_name: &str) -> Option<&str> {
        self.pairs
            .binary_search_by(|pair| pair.mame_name.as_str().cmp(mame_name))
            .ok()
            .map(|idx| self.pairs[idx].real_name.as_str())
    }

    /// Display title for `mame_name`, falling back to the romset name itself.
    pub fn real_name<'a>(&'a self, mame_name: &'a str) -> &'a str {
        self.get(mame_name).unwrap_or(mame_name)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// A sorted set of romset names loaded from `mamebioses.xml` or `mamedevices.xml`.
#[derive(Debug, Clone)]
pub struct RomsetList {
    kind: ListingKind,
    names: Vec<String>,
}

impl RomsetList {
    pub fn load(path: &Path, kind: ListingKind) -> Result<Self, FrontendError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file), kind)
    }

    pub fn from_reader<R: BufRead>(reader: R, kind: ListingKind) -> Result<Self, FrontendError> {
        if kind == ListingKind::Names {
            return Err(FrontendError::InvalidListing(format!(
                "{} is not a romset list",
                kind.file_name()
            )));
        }

        let tag = kind.entry_tag().as_bytes();
        let mut xml = Reader::from_reader(reader);
        let mut buf = Vec::new();
        let mut names = Vec::new();
        let mut current: Option<String> = None;

        loop {
            match xml.read_event_into(&mut buf)? {
                Event::Start(ref e) if e.name().as_ref() == tag => current = Some(String::new()),
                Event::Text(ref e) => {
                    if let Some(name) = current.as_mut() {
                        name.push_str(&e.unescape()?);
                    }
                }
                Event::End(ref e) if e.name().as_ref() == tag => names.extend(current.take()),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        names.sort();
        names.dedup();
        Ok(Self { kind, names })
    }

    pub fn kind(&self) -> ListingKind {
        self.kind
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names
            .binary_search_by(|entry| entry.as_str().cmp(name))
            .is_ok()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/names_tests.rs"]
mod tests;
