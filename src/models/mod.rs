mod category;
mod import_summary;
mod transaction;

pub use category::Category;
pub use import_summary::ImportSummary;
pub use transaction::{resolve_category_name, TransactionRecord, UNASSIGNED};
