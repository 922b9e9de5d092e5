//! Romset classification.
//!
//! Each element shape has its own fixed rule list. Rules are checked in
//! order and the first match wins, so a `<machine>` flagged both
//! `isbios="yes"` and `isdevice="yes"` is a BIOS.

use quick_xml::escape::partial_escape;

use crate::dat::{ElementShape, RawRecord};
use crate::error::RecordError;

/// What a romset turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Bios(String),
    Device(String),
    /// A playable romset with its XML-escaped description.
    Game { name: String, description: String },
}

impl Classification {
    pub fn name(&self) -> &str {
        match self {
            Self::Bios(name) | Self::Device(name) => name,
            Self::Game { name, .. } => name,
        }
    }
}

/// Classify a record using the rules for its element shape.
///
/// `Ok(None)` means the record is deliberately dropped (a device without ROMs).
pub fn classify(
    shape: ElementShape,
    record: &RawRecord,
) -> Result<Option<Classification>, RecordError> {
    match shape {
        ElementShape::Game => classify_game(record).map(Some),
        ElementShape::Machine => classify_machine(record),
    }
}

/// Rules for `<game>` elements. This shape has no device concept.
pub fn classify_game(record: &RawRecord) -> Result<Classification, RecordError> {
    let name = required_name(record, ElementShape::Game)?;
    if record.flag_is("runnable", "no") || record.flag_is("isbios", "yes") {
        return Ok(Classification::Bios(name));
    }
    playable(record, name)
}

/// Rules for `<machine>` elements.
pub fn classify_machine(record: &RawRecord) -> Result<Option<Classification>, RecordError> {
    let name = required_name(record, ElementShape::Machine)?;
    if record.flag_is("isbios", "yes") {
        return Ok(Some(Classification::Bios(name)));
    }
    if record.flag_is("isdevice", "yes") {
        // Devices without ROMs have nothing to distribute.
        if record.rom_count == 0 {
            return Ok(None);
        }
        return Ok(Some(Classification::Device(name)));
    }
    playable(record, name).map(Some)
}

fn required_name(record: &RawRecord, shape: ElementShape) -> Result<String, RecordError> {
    record.name.clone().ok_or(RecordError::MissingName {
        shape: shape.tag(),
    })
}

fn playable(record: &RawRecord, name: String) -> Result<Classification, RecordError> {
    let Some(description) = record.description.as_deref() else {
        return Err(RecordError::MissingDescription { name });
    };
    Ok(Classification::Game {
        description: partial_escape(description).into_owned(),
        name,
    })
}

#[cfg(test)]
#[path = "tests/classify_tests.rs"]
mod tests;
