mod snapshot_loader;
mod snapshot_storage;
#[cfg(test)]
mod tests;

use crate::models::{Category, TransactionRecord};
use crate::types::DateWindow;

pub use snapshot_loader::SnapshotLoader;
pub use snapshot_storage::SnapshotStorage;

/// Read side of the storage collaborator the engine is fed from.
pub trait TransactionSource: Send + Sync + 'static {
    /// Records joined with their category, newest first, optionally limited to an inclusive window.
    fn transactions(&self, window: Option<&DateWindow>) -> Vec<TransactionRecord>;
    /// Every category, ordered by name.
    fn categories(&self) -> Vec<Category>;
}
