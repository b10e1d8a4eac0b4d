//! Structured search.

use reqwest::Method;
use sji_core::models::{RecordCategory, SearchResults};
use sji_core::search::{SearchBuild, SearchFilters, SearchQueryBuilder, SearchRequestBody};

use crate::client::SjiClient;
use crate::error::ApiResult;
use crate::gateway::{RequestOptions, decode_required};

impl SjiClient {
    /// Run a search with an already built body.
    pub async fn search(
        &self,
        q: &str,
        limit: u32,
        page: u32,
        body: &SearchRequestBody,
    ) -> ApiResult<SearchResults> {
        let path = "/api/v1/search";
        let options = RequestOptions::json(body)?
            .query("q", q)
            .query("limit", limit)
            .query("page", page);
        let response = self.gateway.request(Method::POST, path, options).await?;
        decode_required(path, response)
    }

    /// Resolve filter labels to ids through the vocabulary cache.
    pub async fn build_search(
        &self,
        categories: &[RecordCategory],
        filters: &SearchFilters,
    ) -> SearchBuild {
        SearchQueryBuilder::new(&self.vocabularies, self)
            .build_with_report(categories, filters)
            .await
    }

    /// Build the body from labels, then search.
    pub async fn search_with_filters(
        &self,
        q: &str,
        limit: u32,
        page: u32,
        categories: &[RecordCategory],
        filters: &SearchFilters,
    ) -> ApiResult<SearchResults> {
        let build = self.build_search(categories, filters).await;
        self.search(q, limit, page, &build.body).await
    }
}
