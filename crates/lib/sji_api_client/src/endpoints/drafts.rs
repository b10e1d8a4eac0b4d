//! The caller's unfinished records.

use reqwest::Method;
use sji_core::models::{DraftSummary, RecordCategory};

use crate::client::SjiClient;
use crate::error::ApiResult;
use crate::gateway::{RequestOptions, segment};

impl SjiClient {
    pub async fn list_drafts(&self, category: RecordCategory) -> ApiResult<Vec<DraftSummary>> {
        self.gateway
            .get_json(
                &format!("/api/v1/draft/{}", category.as_str()),
                RequestOptions::new(),
            )
            .await
    }

    pub async fn delete_draft(&self, category: RecordCategory, id: &str) -> ApiResult<()> {
        self.gateway
            .send_unit(
                Method::DELETE,
                &format!("/api/v1/draft/{}/{}", category.as_str(), segment(id)),
                RequestOptions::new(),
            )
            .await
    }
}
