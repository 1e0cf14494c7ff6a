use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Outcome of an import as reported by the ingestion side.
///
/// The engine only renders these counts; it never computes them from bank files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Rows stored as new transactions.
    pub inserted: usize,
    /// Rows whose id was already known.
    pub duplicates_skipped: usize,
    /// Human-readable row-level failures.
    #[serde(default)]
    pub errors: Vec<String>
}

impl ImportSummary {
    pub fn rows_processed(&self) -> usize {
        self.inserted + self.duplicates_skipped
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl Display for ImportSummary {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} inserted, {} duplicates skipped, {} errors ({} rows processed)",
            self.inserted,
            self.duplicates_skipped,
            self.errors.len(),
            self.rows_processed()
        )
    }
}
