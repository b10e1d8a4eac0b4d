//! Contribution history and pagination envelopes.

use serde::{Deserialize, Serialize};

use super::de;
use super::record::RecordCategory;

/// Page metadata returned next to every paginated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default, rename = "totalPages", alias = "total_pages")]
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// A page of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// One entry of the contribution event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionEvent {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "de::opt_string_or_number")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    /// What happened: `create`, `update`, `activate`, `reject`, ...
    pub action: String,
    #[serde(default, rename = "type", alias = "category")]
    pub category: Option<RecordCategory>,
    #[serde(default, deserialize_with = "de::opt_string_or_number")]
    pub record_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
