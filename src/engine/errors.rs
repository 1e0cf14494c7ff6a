use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unknown sort field '{0}' (expected date, amount, merchant or description)")]
    UnknownSortField(String)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupRuleError {
    #[error("Group rule '{0}' must be written as Label=field:pattern")]
    MissingSeparator(String),
    #[error("Group rule '{0}' has an empty label")]
    EmptyLabel(String),
    #[error("Group rule '{0}' has an empty pattern")]
    EmptyPattern(String),
    #[error("Group rule '{rule}' uses unknown field '{field}' (expected description, merchant, text or category)")]
    UnknownField {
        rule: String,
        field: String
    }
}
