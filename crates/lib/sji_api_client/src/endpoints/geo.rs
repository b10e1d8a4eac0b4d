//! Geographic reference lookups.

use sji_core::models::GeoOption;

use crate::client::SjiClient;
use crate::error::ApiResult;
use crate::gateway::RequestOptions;

impl SjiClient {
    pub async fn countries(&self) -> ApiResult<Vec<GeoOption>> {
        self.gateway
            .get_json("/api/v1/pays", RequestOptions::new())
            .await
    }

    pub async fn regions(&self) -> ApiResult<Vec<GeoOption>> {
        self.gateway
            .get_json("/api/v1/regions", RequestOptions::new())
            .await
    }

    pub async fn departments(&self) -> ApiResult<Vec<GeoOption>> {
        self.gateway
            .get_json("/api/v1/departments", RequestOptions::new())
            .await
    }

    /// Cities whose name matches `q`.
    pub async fn cities(&self, q: &str) -> ApiResult<Vec<GeoOption>> {
        self.gateway
            .get_json("/api/v1/cities", RequestOptions::new().query("q", q))
            .await
    }
}
