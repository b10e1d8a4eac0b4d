//! Controlled-vocabulary and geographic reference values.

use serde::{Deserialize, Serialize};

use super::de;

/// One entry of a controlled vocabulary (century, material, profession, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    pub name: String,
}

impl FilterOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The id as the integer the search endpoint expects.
    pub fn numeric_id(&self) -> Option<i64> {
        self.id.trim().parse().ok()
    }
}

/// Country, region, department or city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoOption {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_accepts_numbers_and_strings() {
        let a: FilterOption = serde_json::from_str(r#"{"id": 7, "name": "Notaire"}"#).unwrap();
        let b: FilterOption = serde_json::from_str(r#"{"id": "7", "name": "Notaire"}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.numeric_id(), Some(7));
    }

    #[test]
    fn non_numeric_id_has_no_numeric_form() {
        assert_eq!(FilterOption::new("x1", "Bois").numeric_id(), None);
    }
}
