use std::fmt;

use chrono::{NaiveDate, Utc};

/// Where a set of listings came from: the generation date and the DAT
/// files that were successfully parsed, in parse order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub date: NaiveDate,
    pub sources: Vec<String>,
}

impl Provenance {
    pub fn new<S: Into<String>>(date: NaiveDate, sources: impl IntoIterator<Item = S>) -> Self {
        Self {
            date,
            sources: sources.into_iter().map(Into::into).collect(),
        }
    }

    /// Provenance dated with the current UTC calendar date.
    pub fn today<S: Into<String>>(sources: impl IntoIterator<Item = S>) -> Self {
        Self::new(Utc::now().date_naive(), sources)
    }
}

/// Renders the single-line comment placed at the top of every listing.
impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<!-- Generated on {}, from {} -->",
            self.date.format("%Y-%m-%d"),
            self.sources.join(", ")
        )
    }
}
