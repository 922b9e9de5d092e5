//! Reading MAME-compatible DAT files and sorting their romsets into
//! games, BIOSes and devices.

pub mod catalog;
pub mod classify;
pub mod dat;
pub mod error;

pub use catalog::{IngestSummary, RomsetCatalog};
pub use classify::Classification;
pub use dat::{DatDocument, ElementShape, RawRecord, parse_dat, parse_dat_file};
pub use error::{DatError, RecordError};
