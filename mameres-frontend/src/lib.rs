//! Output side of the converter: the lookup listings consumed by the
//! frontend, and readers for them.

pub mod error;
pub mod listing;
pub mod names;
pub mod provenance;

pub use error::FrontendError;
pub use listing::{EmitOutcome, ListingKind, write_listing, write_listings};
pub use names::{MameNames, RomsetList};
pub use provenance::Provenance;
