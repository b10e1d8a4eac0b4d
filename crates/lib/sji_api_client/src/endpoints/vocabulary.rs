//! Controlled-vocabulary lookups.

use async_trait::async_trait;
use sji_core::models::FilterOption;
use sji_core::vocabulary::{VocabularyKind, VocabularySource};

use crate::client::SjiClient;
use crate::error::{ApiError, ApiResult};
use crate::gateway::RequestOptions;

impl SjiClient {
    /// Fetch a vocabulary, bypassing the cache.
    pub async fn fetch_vocabulary(&self, kind: VocabularyKind) -> ApiResult<Vec<FilterOption>> {
        self.gateway
            .get_json(kind.endpoint(), RequestOptions::new())
            .await
    }

    /// Cached vocabulary; a stale copy is served if the refresh fails.
    pub async fn vocabulary(&self, kind: VocabularyKind) -> ApiResult<Vec<FilterOption>> {
        self.vocabularies
            .get(kind.key(), || self.fetch_vocabulary(kind))
            .await
    }
}

#[async_trait]
impl VocabularySource for SjiClient {
    type Error = ApiError;

    async fn fetch_vocabulary(&self, kind: VocabularyKind) -> Result<Vec<FilterOption>, ApiError> {
        SjiClient::fetch_vocabulary(self, kind).await
    }
}
