//! Controlled vocabularies: the name→id tables behind every search filter.

pub mod cache;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

pub use cache::VocabularyCache;

use crate::models::FilterOption;

/// Every vocabulary the backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VocabularyKind {
    Centuries,
    Themes,
    Materials,
    ConservationStates,
    BuildingNatures,
    FurnituresNatures,
    FurnituresTechniques,
    LegalEntityNatures,
    Professions,
    Travels,
    HistoricalPeriods,
}

impl VocabularyKind {
    pub const ALL: [VocabularyKind; 11] = [
        VocabularyKind::Centuries,
        VocabularyKind::Themes,
        VocabularyKind::Materials,
        VocabularyKind::ConservationStates,
        VocabularyKind::BuildingNatures,
        VocabularyKind::FurnituresNatures,
        VocabularyKind::FurnituresTechniques,
        VocabularyKind::LegalEntityNatures,
        VocabularyKind::Professions,
        VocabularyKind::Travels,
        VocabularyKind::HistoricalPeriods,
    ];

    /// Cache key.
    pub fn key(&self) -> &'static str {
        match self {
            VocabularyKind::Centuries => "centuries",
            VocabularyKind::Themes => "themes",
            VocabularyKind::Materials => "materials",
            VocabularyKind::ConservationStates => "conservationStates",
            VocabularyKind::BuildingNatures => "buildingNatures",
            VocabularyKind::FurnituresNatures => "furnituresNatures",
            VocabularyKind::FurnituresTechniques => "furnituresTechniques",
            VocabularyKind::LegalEntityNatures => "legalEntityNatures",
            VocabularyKind::Professions => "professions",
            VocabularyKind::Travels => "travels",
            VocabularyKind::HistoricalPeriods => "historicalPeriods",
        }
    }

    /// Endpoint path under the API origin.
    pub fn endpoint(&self) -> &'static str {
        match self {
            VocabularyKind::Centuries => "/api/v1/centuries",
            VocabularyKind::Themes => "/api/v1/themes",
            VocabularyKind::Materials => "/api/v1/materials",
            VocabularyKind::ConservationStates => "/api/v1/conservation_states",
            VocabularyKind::BuildingNatures => "/api/v1/building_natures",
            VocabularyKind::FurnituresNatures => "/api/v1/furnitures_natures",
            VocabularyKind::FurnituresTechniques => "/api/v1/furnitures_techniques",
            VocabularyKind::LegalEntityNatures => "/api/v1/legal_entity_natures",
            VocabularyKind::Professions => "/api/v1/professions",
            VocabularyKind::Travels => "/api/v1/travels",
            VocabularyKind::HistoricalPeriods => "/api/v1/historical_periods",
        }
    }
}

impl fmt::Display for VocabularyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for VocabularyKind {
    type Err = String;

    /// Accepts the cache key (`buildingNatures`) or the endpoint name (`building_natures`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VocabularyKind::ALL
            .into_iter()
            .find(|k| k.key() == s || k.endpoint().rsplit('/').next() == Some(s))
            .ok_or_else(|| format!("unknown vocabulary: {s}"))
    }
}

/// Where vocabularies come from on a cache miss.
#[async_trait]
pub trait VocabularySource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn fetch_vocabulary(&self, kind: VocabularyKind)
    -> Result<Vec<FilterOption>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_key_and_endpoint_name() {
        assert_eq!(
            "furnituresTechniques".parse::<VocabularyKind>().unwrap(),
            VocabularyKind::FurnituresTechniques
        );
        assert_eq!(
            "legal_entity_natures".parse::<VocabularyKind>().unwrap(),
            VocabularyKind::LegalEntityNatures
        );
        assert!("colors".parse::<VocabularyKind>().is_err());
    }

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<_> = VocabularyKind::ALL.iter().map(|k| k.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), VocabularyKind::ALL.len());
    }
}
