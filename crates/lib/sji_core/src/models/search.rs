//! Search results.

use serde::{Deserialize, Serialize};

use super::contribution::Paginated;
use super::de;
use super::record::RecordCategory;

/// One record matched by `POST /api/v1/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    #[serde(default, rename = "type", alias = "category")]
    pub category: Option<RecordCategory>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

pub type SearchResults = Paginated<SearchHit>;
