//! Heritage records and their four categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::de;
use super::filter::{FilterOption, GeoOption};

/// Record category, as used in endpoint paths (`/api/v1/{category}/{id}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordCategory {
    MonumentsLieux,
    MobiliersImages,
    PersonnesMorales,
    PersonnesPhysiques,
}

impl RecordCategory {
    pub const ALL: [RecordCategory; 4] = [
        RecordCategory::MonumentsLieux,
        RecordCategory::MobiliersImages,
        RecordCategory::PersonnesMorales,
        RecordCategory::PersonnesPhysiques,
    ];

    /// Path segment and wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordCategory::MonumentsLieux => "monuments_lieux",
            RecordCategory::MobiliersImages => "mobiliers_images",
            RecordCategory::PersonnesMorales => "personnes_morales",
            RecordCategory::PersonnesPhysiques => "personnes_physiques",
        }
    }

    /// Key of this category's sub-object in a search request body.
    pub fn search_key(&self) -> &'static str {
        match self {
            RecordCategory::MonumentsLieux => "monu_lieux",
            RecordCategory::MobiliersImages => "mob_img",
            RecordCategory::PersonnesMorales => "pers_morales",
            RecordCategory::PersonnesPhysiques => "pers_physiques",
        }
    }

    /// Human label used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            RecordCategory::MonumentsLieux => "Monument / Lieu",
            RecordCategory::MobiliersImages => "Mobilier / Image",
            RecordCategory::PersonnesMorales => "Personne morale",
            RecordCategory::PersonnesPhysiques => "Personne physique",
        }
    }
}

impl fmt::Display for RecordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a category name that is not one of the four known ones.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown record category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for RecordCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s || c.search_key() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A person reference (author, contributor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRef {
    #[serde(default, deserialize_with = "de::opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
}

impl PersonRef {
    pub fn full_name(&self) -> String {
        [self.firstname.as_deref(), self.lastname.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Uploaded media attached to a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Fields shared by every record category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEnvelope {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub authors: Vec<PersonRef>,
    #[serde(default)]
    pub medias: Vec<Media>,
    #[serde(default)]
    pub pays: Option<GeoOption>,
    #[serde(default)]
    pub region: Option<GeoOption>,
    #[serde(default)]
    pub department: Option<GeoOption>,
    #[serde(default)]
    pub city: Option<GeoOption>,
    #[serde(default)]
    pub centuries: Vec<FilterOption>,
    #[serde(default)]
    pub themes: Vec<FilterOption>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Free-text credits typed by the contributor.
    #[serde(default)]
    pub contributors: Option<String>,
    /// Set when this record is a pending modification of a published one.
    #[serde(default, deserialize_with = "de::opt_string_or_number")]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monument {
    #[serde(flatten)]
    pub envelope: RecordEnvelope,
    #[serde(default)]
    pub natures: Vec<FilterOption>,
    #[serde(default)]
    pub materials: Vec<FilterOption>,
    #[serde(default)]
    pub conservation_states: Vec<FilterOption>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub history: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Furniture {
    #[serde(flatten)]
    pub envelope: RecordEnvelope,
    #[serde(default)]
    pub natures: Vec<FilterOption>,
    #[serde(default)]
    pub techniques: Vec<FilterOption>,
    #[serde(default)]
    pub materials: Vec<FilterOption>,
    #[serde(default)]
    pub conservation_states: Vec<FilterOption>,
    #[serde(default)]
    pub historical_period: Option<FilterOption>,
    /// Where the object is kept today.
    #[serde(default)]
    pub current_location: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalEntity {
    #[serde(flatten)]
    pub envelope: RecordEnvelope,
    #[serde(default)]
    pub natures: Vec<FilterOption>,
    #[serde(default)]
    pub foundation_date: Option<String>,
    #[serde(default)]
    pub simple_mention: Option<bool>,
    #[serde(default)]
    pub social_involvement: Option<String>,
    #[serde(default)]
    pub statutes_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    #[serde(flatten)]
    pub envelope: RecordEnvelope,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub death: Option<String>,
    #[serde(default)]
    pub professions: Vec<FilterOption>,
    #[serde(default)]
    pub travels: Vec<FilterOption>,
    #[serde(default)]
    pub historical_period: Option<FilterOption>,
    #[serde(default)]
    pub biography: Option<String>,
}

/// A fetched record, tagged with the category it was requested under.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", content = "record")]
pub enum RecordDetail {
    #[serde(rename = "monuments_lieux")]
    Monument(Monument),
    #[serde(rename = "mobiliers_images")]
    Furniture(Furniture),
    #[serde(rename = "personnes_morales")]
    LegalEntity(LegalEntity),
    #[serde(rename = "personnes_physiques")]
    Individual(Individual),
}

impl RecordDetail {
    /// Decode a raw payload as the shape of `category`.
    pub fn from_value(
        category: RecordCategory,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match category {
            RecordCategory::MonumentsLieux => RecordDetail::Monument(serde_json::from_value(value)?),
            RecordCategory::MobiliersImages => {
                RecordDetail::Furniture(serde_json::from_value(value)?)
            }
            RecordCategory::PersonnesMorales => {
                RecordDetail::LegalEntity(serde_json::from_value(value)?)
            }
            RecordCategory::PersonnesPhysiques => {
                RecordDetail::Individual(serde_json::from_value(value)?)
            }
        })
    }

    pub fn category(&self) -> RecordCategory {
        match self {
            RecordDetail::Monument(_) => RecordCategory::MonumentsLieux,
            RecordDetail::Furniture(_) => RecordCategory::MobiliersImages,
            RecordDetail::LegalEntity(_) => RecordCategory::PersonnesMorales,
            RecordDetail::Individual(_) => RecordCategory::PersonnesPhysiques,
        }
    }

    pub fn envelope(&self) -> &RecordEnvelope {
        match self {
            RecordDetail::Monument(r) => &r.envelope,
            RecordDetail::Furniture(r) => &r.envelope,
            RecordDetail::LegalEntity(r) => &r.envelope,
            RecordDetail::Individual(r) => &r.envelope,
        }
    }

    /// True when the record modifies an already published one.
    pub fn is_modification(&self) -> bool {
        self.envelope().parent_id.is_some()
    }

    /// Heading shown for the record: the person's name for individuals, the title otherwise.
    pub fn display_title(&self) -> String {
        if let RecordDetail::Individual(p) = self {
            let name = PersonRef {
                id: None,
                firstname: p.firstname.clone(),
                lastname: p.lastname.clone(),
            }
            .full_name();
            if !name.is_empty() {
                return name;
            }
        }
        self.envelope()
            .title
            .clone()
            .unwrap_or_else(|| format!("{} #{}", self.category().label(), self.envelope().id))
    }
}

/// Entry of the caller's draft list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSummary {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn category_parses_path_and_search_names() {
        assert_eq!(
            "personnes_physiques".parse::<RecordCategory>().unwrap(),
            RecordCategory::PersonnesPhysiques
        );
        assert_eq!(
            "mob_img".parse::<RecordCategory>().unwrap(),
            RecordCategory::MobiliersImages
        );
        assert!("chapelles".parse::<RecordCategory>().is_err());
    }

    #[test]
    fn detail_is_decoded_by_requested_category() {
        let raw = json!({
            "id": 12,
            "firstname": "Jean",
            "lastname": "Dupont",
            "professions": [{"id": 7, "name": "Notaire"}],
            "centuries": [{"id": "3", "name": "XVIe"}]
        });
        let detail = RecordDetail::from_value(RecordCategory::PersonnesPhysiques, raw).unwrap();
        assert_eq!(detail.category(), RecordCategory::PersonnesPhysiques);
        assert_eq!(detail.display_title(), "Jean Dupont");
        assert_eq!(detail.envelope().id, "12");
        assert!(!detail.is_modification());
        match detail {
            RecordDetail::Individual(p) => assert_eq!(p.professions[0].id, "7"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn parent_id_marks_a_modification() {
        let raw = json!({"id": "5", "title": "Chapelle Saint-Roch", "parent_id": 2});
        let detail = RecordDetail::from_value(RecordCategory::MonumentsLieux, raw).unwrap();
        assert!(detail.is_modification());
        assert_eq!(detail.display_title(), "Chapelle Saint-Roch");
    }

    #[test]
    fn serialized_detail_carries_its_category() {
        let raw = json!({"id": 1});
        let detail = RecordDetail::from_value(RecordCategory::PersonnesMorales, raw).unwrap();
        let out = serde_json::to_value(&detail).unwrap();
        assert_eq!(out["category"], "personnes_morales");
        assert_eq!(out["record"]["id"], "1");
    }

    #[test]
    fn untitled_record_falls_back_to_category_and_id() {
        let detail =
            RecordDetail::from_value(RecordCategory::MobiliersImages, json!({"id": 9})).unwrap();
        assert_eq!(detail.display_title(), "Mobilier / Image #9");
    }
}
