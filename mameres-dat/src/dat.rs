use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;

use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::DatError;

/// The two element shapes a romset can take in a MAME-compatible DAT file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementShape {
    /// `<game>`, used by older MAME releases, MAME2003 and FBNeo.
    Game,
    /// `<machine>`, used by upstream MAME.
    Machine,
}

impl ElementShape {
    /// The XML tag name for this shape.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::Machine => "machine",
        }
    }

    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"game" => Some(Self::Game),
            b"machine" => Some(Self::Machine),
            _ => None,
        }
    }
}

/// A romset element as found in the DAT, before classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// The `name` attribute, if present.
    pub name: Option<String>,
    /// Unescaped text of the first direct `<description>` child.
    /// `None` when the child is missing or empty.
    pub description: Option<String>,
    /// Every attribute other than `name` (`isbios`, `isdevice`, `runnable`, `cloneof`, ...).
    pub flags: BTreeMap<String, String>,
    /// Number of direct `<rom>` children.
    pub rom_count: usize,
}

impl RawRecord {
    pub fn flag(&self, key: &str) -> Option<&str> {
        self.flags.get(key).map(String::as_str)
    }

    /// True when the attribute `key` is present and equal to `value`.
    pub fn flag_is(&self, key: &str, value: &str) -> bool {
        self.flag(key) == Some(value)
    }
}

/// All romset records extracted from one DAT document.
///
/// `<game>` and `<machine>` elements are kept as two independent sequences,
/// each in document order (start tags, depth-first, any nesting level).
#[derive(Debug, Clone, Default)]
pub struct DatDocument {
    games: Vec<RawRecord>,
    machines: Vec<RawRecord>,
}

impl DatDocument {
    /// Records found as `<game>` elements.
    pub fn games(&self) -> std::slice::Iter<'_, RawRecord> {
        self.games.iter()
    }

    /// Records found as `<machine>` elements.
    pub fn machines(&self) -> std::slice::Iter<'_, RawRecord> {
        self.machines.iter()
    }

    pub fn records(&self, shape: ElementShape) -> std::slice::Iter<'_, RawRecord> {
        match shape {
            ElementShape::Game => self.games(),
            ElementShape::Machine => self.machines(),
        }
    }

    pub fn len(&self) -> usize {
        self.games.len() + self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse a DAT document. Any XML error fails the whole document.
///
/// Text and attribute values are decoded with the encoding named in the XML
/// declaration (UTF-8 when there is none).
pub fn parse_dat<R: BufRead>(reader: R) -> Result<DatDocument, DatError> {
    let mut xml = Reader::from_reader(reader);
    let mut buf = Vec::new();
    let mut extractor = Extractor::default();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => extractor.open(e, true, xml.decoder())?,
            Event::Empty(ref e) => extractor.open(e, false, xml.decoder())?,
            Event::End(_) => extractor.close()?,
            Event::Text(ref e) => {
                let text = e.unescape()?;
                extractor.text(&text)?;
            }
            Event::CData(ref e) => {
                let text = xml.decoder().decode(e).map_err(quick_xml::Error::from)?;
                extractor.text(&text)?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    extractor.finish()
}

/// Parse a DAT document from a file path.
pub fn parse_dat_file(path: &Path) -> Result<DatDocument, DatError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    parse_dat(reader)
}

// ---------------------------------------------------------------------------
// Event-driven extraction
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Frame {
    /// Index into `Extractor::pending` when this element is a romset.
    record: Option<usize>,
    /// Romset whose description text this element holds.
    description_of: Option<usize>,
    has_child: bool,
}

struct Pending {
    shape: ElementShape,
    record: RawRecord,
    description_seen: bool,
}

#[derive(Default)]
struct Extractor {
    stack: Vec<Frame>,
    pending: Vec<Pending>,
    root_seen: bool,
    root_closed: bool,
}

impl Extractor {
    fn open(
        &mut self,
        e: &BytesStart<'_>,
        has_content: bool,
        decoder: Decoder,
    ) -> Result<(), DatError> {
        if self.stack.is_empty() {
            if self.root_closed {
                return Err(DatError::unparseable("junk after document element"));
            }
            self.root_seen = true;
        }

        let name = e.name();
        let tag = name.as_ref();
        let mut frame = Frame::default();

        if let Some(parent) = self.stack.last_mut() {
            parent.has_child = true;
            if let Some(idx) = parent.record {
                let pending = &mut self.pending[idx];
                match tag {
                    b"rom" => pending.record.rom_count += 1,
                    b"description" if !pending.description_seen => {
                        pending.description_seen = true;
                        frame.description_of = Some(idx);
                    }
                    _ => {}
                }
            }
        }

        if let Some(shape) = ElementShape::from_tag(tag) {
            let record = read_attributes(e, decoder)?;
            frame.record = Some(self.pending.len());
            self.pending.push(Pending {
                shape,
                record,
                description_seen: false,
            });
        }

        if has_content {
            self.stack.push(frame);
        } else if self.stack.is_empty() {
            self.root_closed = true;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), DatError> {
        if self.stack.pop().is_none() {
            return Err(DatError::unparseable("unmatched end tag"));
        }
        if self.stack.is_empty() {
            self.root_closed = true;
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), DatError> {
        match self.stack.last() {
            None => {
                if !is_blank(text) {
                    return Err(DatError::unparseable("text outside the root element"));
                }
            }
            Some(frame) => {
                if let (Some(idx), false) = (frame.description_of, frame.has_child) {
                    if !text.is_empty() {
                        self.pending[idx]
                            .record
                            .description
                            .get_or_insert_with(String::new)
                            .push_str(&normalize_newlines(text));
                    }
                }
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<DatDocument, DatError> {
        if !self.root_seen {
            return Err(DatError::unparseable("no root element found"));
        }
        if !self.stack.is_empty() {
            return Err(DatError::unparseable(format!(
                "{} unclosed element(s) at end of file",
                self.stack.len()
            )));
        }

        let mut doc = DatDocument::default();
        for pending in self.pending {
            match pending.shape {
                ElementShape::Game => doc.games.push(pending.record),
                ElementShape::Machine => doc.machines.push(pending.record),
            }
        }
        Ok(doc)
    }
}

fn read_attributes(e: &BytesStart<'_>, decoder: Decoder) -> Result<RawRecord, DatError> {
    let mut record = RawRecord::default();
    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.decode_and_unescape_value(decoder)?.into_owned();
        match attr.key.as_ref() {
            b"name" => record.name = Some(value),
            key => {
                record
                    .flags
                    .insert(String::from_utf8_lossy(key).into_owned(), value);
            }
        }
    }
    Ok(record)
}

/// XML line-end handling: `\r\n` and lone `\r` become `\n`.
fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == '\u{feff}')
}

#[cfg(test)]
#[path = "tests/dat_tests.rs"]
mod tests;
