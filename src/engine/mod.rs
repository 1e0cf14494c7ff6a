mod errors;
mod grouping;
mod overview;
mod pipeline;
mod summary;

pub use errors::{GroupRuleError, QueryError};
pub use grouping::{group_reports, GroupMatcher, GroupReport, GroupRule};
pub use overview::{ranked_breakdown, recent_categorized, CategorySpend};
pub use pipeline::{category_filter_options, CategoryFilter, SortDirection, SortField, SortOrder, TransactionQuery, ALL_CATEGORIES};
pub use summary::{Summary, SummaryPeriod};
