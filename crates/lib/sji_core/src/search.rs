// @zen-component: SRC-SearchQueryBuilder
//
//! Search query builder.
//!
//! Turns the filter labels picked in the search panel into the id-based body
//! `POST /api/v1/search` expects. Labels are resolved through the vocabulary
//! cache; a label with no exact match is dropped.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{FilterOption, RecordCategory};
use crate::vocabulary::{VocabularyCache, VocabularyKind, VocabularySource};

/// Filter selections as labels (vocabularies) or ids (geography).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchFilters {
    pub centuries: Vec<String>,
    pub themes: Vec<String>,
    pub countries: Vec<String>,
    pub regions: Vec<String>,
    pub departments: Vec<String>,
    pub cities: Vec<String>,
    pub materials: Vec<String>,
    pub building_natures: Vec<String>,
    pub furnitures_natures: Vec<String>,
    pub furnitures_techniques: Vec<String>,
    pub legal_entity_natures: Vec<String>,
    pub professions: Vec<String>,
    pub travels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonumentFilters {
    pub natures: Vec<i64>,
    pub materials: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnitureFilters {
    pub natures: Vec<i64>,
    pub techniques: Vec<i64>,
    pub materials: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalEntityFilters {
    pub natures: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualFilters {
    pub professions: Vec<i64>,
    pub travels: Vec<i64>,
}

/// Body of `POST /api/v1/search`. Unset parts are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centuries: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themes: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pays: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departements: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communes: Option<Vec<i64>>,
    #[serde(default, rename = "monu_lieux", skip_serializing_if = "Option::is_none")]
    pub monuments: Option<MonumentFilters>,
    #[serde(default, rename = "mob_img", skip_serializing_if = "Option::is_none")]
    pub furnitures: Option<FurnitureFilters>,
    #[serde(default, rename = "pers_morales", skip_serializing_if = "Option::is_none")]
    pub legal_entities: Option<LegalEntityFilters>,
    #[serde(default, rename = "pers_physiques", skip_serializing_if = "Option::is_none")]
    pub individuals: Option<IndividualFilters>,
}

impl SearchRequestBody {
    /// True when no filter at all is applied.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A built body plus the vocabularies that could not be loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBuild {
    pub body: SearchRequestBody,
    /// Each failed vocabulary left only its own field empty or unset.
    pub failed: Vec<VocabularyKind>,
}

/// Builds search bodies, resolving labels through a shared cache.
pub struct SearchQueryBuilder<'a, S: VocabularySource> {
    cache: &'a VocabularyCache,
    source: &'a S,
}

impl<'a, S: VocabularySource> SearchQueryBuilder<'a, S> {
    pub fn new(cache: &'a VocabularyCache, source: &'a S) -> Self {
        Self { cache, source }
    }

    /// Build the body for `categories`, keeping whatever resolved.
    pub async fn build(
        &self,
        categories: &[RecordCategory],
        filters: &SearchFilters,
    ) -> SearchRequestBody {
        self.build_with_report(categories, filters).await.body
    }

    pub async fn build_with_report(
        &self,
        categories: &[RecordCategory],
        filters: &SearchFilters,
    ) -> SearchBuild {
        let mut failed = Vec::new();
        let mut body = SearchRequestBody::default();

        if !filters.centuries.is_empty() {
            body.centuries = self
                .resolve(VocabularyKind::Centuries, &filters.centuries, &mut failed)
                .await;
        }
        if !filters.themes.is_empty() {
            body.themes = self
                .resolve(VocabularyKind::Themes, &filters.themes, &mut failed)
                .await;
        }

        body.pays = parse_ids(&filters.countries);
        body.regions = parse_ids(&filters.regions);
        body.departements = parse_ids(&filters.departments);
        body.communes = parse_ids(&filters.cities);

        for category in categories {
            match category {
                RecordCategory::MonumentsLieux => {
                    body.monuments = Some(MonumentFilters {
                        natures: self
                            .resolve_or_empty(
                                VocabularyKind::BuildingNatures,
                                &filters.building_natures,
                                &mut failed,
                            )
                            .await,
                        materials: self
                            .resolve_or_empty(
                                VocabularyKind::Materials,
                                &filters.materials,
                                &mut failed,
                            )
                            .await,
                    });
                }
                RecordCategory::MobiliersImages => {
                    body.furnitures = Some(FurnitureFilters {
                        natures: self
                            .resolve_or_empty(
                                VocabularyKind::FurnituresNatures,
                                &filters.furnitures_natures,
                                &mut failed,
                            )
                            .await,
                        techniques: self
                            .resolve_or_empty(
                                VocabularyKind::FurnituresTechniques,
                                &filters.furnitures_techniques,
                                &mut failed,
                            )
                            .await,
                        materials: self
                            .resolve_or_empty(
                                VocabularyKind::Materials,
                                &filters.materials,
                                &mut failed,
                            )
                            .await,
                    });
                }
                RecordCategory::PersonnesMorales => {
                    body.legal_entities = Some(LegalEntityFilters {
                        natures: self
                            .resolve_or_empty(
                                VocabularyKind::LegalEntityNatures,
                                &filters.legal_entity_natures,
                                &mut failed,
                            )
                            .await,
                    });
                }
                RecordCategory::PersonnesPhysiques => {
                    body.individuals = Some(IndividualFilters {
                        professions: self
                            .resolve_or_empty(
                                VocabularyKind::Professions,
                                &filters.professions,
                                &mut failed,
                            )
                            .await,
                        travels: self
                            .resolve_or_empty(
                                VocabularyKind::Travels,
                                &filters.travels,
                                &mut failed,
                            )
                            .await,
                    });
                }
            }
        }

        SearchBuild { body, failed }
    }

    /// Ids for `names`, or `None` (and a recorded failure) if the vocabulary
    /// could not be loaded.
    async fn resolve(
        &self,
        kind: VocabularyKind,
        names: &[String],
        failed: &mut Vec<VocabularyKind>,
    ) -> Option<Vec<i64>> {
        let source = self.source;
        match self
            .cache
            .get(kind.key(), move || source.fetch_vocabulary(kind))
            .await
        {
            Ok(options) => Some(resolve_names(&options, names)),
            Err(e) => {
                warn!(vocabulary = %kind, "search filter dropped, vocabulary unavailable: {e}");
                if !failed.contains(&kind) {
                    failed.push(kind);
                }
                None
            }
        }
    }

    async fn resolve_or_empty(
        &self,
        kind: VocabularyKind,
        names: &[String],
        failed: &mut Vec<VocabularyKind>,
    ) -> Vec<i64> {
        if names.is_empty() {
            return Vec::new();
        }
        self.resolve(kind, names, failed).await.unwrap_or_default()
    }
}

/// Convenience wrapper over [`SearchQueryBuilder::build`].
pub async fn transform_filters_to_api_format<S: VocabularySource>(
    cache: &VocabularyCache,
    source: &S,
    categories: &[RecordCategory],
    filters: &SearchFilters,
) -> SearchRequestBody {
    SearchQueryBuilder::new(cache, source)
        .build(categories, filters)
        .await
}

/// Map labels to numeric ids by exact, case-sensitive name match.
/// Unmatched labels and non-numeric ids are skipped.
pub fn resolve_names(options: &[FilterOption], names: &[String]) -> Vec<i64> {
    names
        .iter()
        .filter_map(|name| options.iter().find(|o| &o.name == name))
        .filter_map(FilterOption::numeric_id)
        .collect()
}

fn parse_ids(raw: &[String]) -> Option<Vec<i64>> {
    if raw.is_empty() {
        return None;
    }
    Some(raw.iter().filter_map(|id| id.trim().parse().ok()).collect())
}
