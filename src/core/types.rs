use serde::{Deserialize, Serialize};

/// Category assigned when a term is added without one.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// A named entry in the store. Terms are never mutated in place;
/// they are created by `add_term` or import and removed by delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub name: String,
    pub category: String,
}

impl Term {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}
