use serde::{Deserialize, Serialize};

/// A user- or system-defined spending bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Unique display label; filter matching is case-sensitive on it.
    pub name: String,
    /// Display accent used to tint breakdown bars. No effect on computation.
    #[serde(default)]
    pub color: Option<String>
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}
