//! Administrator views: roster and contribution logs.

use sji_core::models::{ContributionEvent, Paginated, User};

use crate::client::SjiClient;
use crate::error::ApiResult;
use crate::gateway::{RequestOptions, segment};

impl SjiClient {
    /// Every account, whatever its grade.
    pub async fn get_all_users(&self) -> ApiResult<Vec<User>> {
        self.gateway
            .get_json("/api/v1/admin/users", RequestOptions::new())
            .await
    }

    /// Platform-wide contribution log.
    pub async fn list_contributions(
        &self,
        limit: u32,
        page: u32,
    ) -> ApiResult<Paginated<ContributionEvent>> {
        self.gateway
            .get_json(
                "/api/v1/admin/contributions",
                RequestOptions::new()
                    .query("limit", limit)
                    .query("page", page),
            )
            .await
    }

    /// Contributions of a single user.
    pub async fn user_history(
        &self,
        user_id: &str,
        limit: u32,
        page: u32,
    ) -> ApiResult<Paginated<ContributionEvent>> {
        self.gateway
            .get_json(
                &format!("/api/v1/history/{}", segment(user_id)),
                RequestOptions::new()
                    .query("limit", limit)
                    .query("page", page),
            )
            .await
    }
}
