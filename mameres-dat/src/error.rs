/// Errors that can occur while reading a DAT file.
#[derive(Debug, thiserror::Error)]
pub enum DatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Unparseable DAT file: {0}")]
    Unparseable(String),
}

impl DatError {
    pub fn unparseable(msg: impl Into<String>) -> Self {
        Self::Unparseable(msg.into())
    }
}

/// A single romset record that cannot be classified.
///
/// These never abort a file; the catalog skips the record and moves on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("<{shape}> element without a 'name' attribute")]
    MissingName { shape: &'static str },

    #[error("romset '{name}' has no description")]
    MissingDescription { name: String },
}
