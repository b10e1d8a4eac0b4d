//! Contributor accounts.

use reqwest::Method;
use serde_json::json;
use sji_core::models::{NewUser, User, UserUpdate, ValidationAction};

use crate::client::SjiClient;
use crate::error::ApiResult;
use crate::gateway::{RequestOptions, segment};

impl SjiClient {
    /// Accounts waiting for an administrator's decision.
    pub async fn list_pending_users(&self) -> ApiResult<Vec<User>> {
        self.gateway
            .get_json("/api/v1/users", RequestOptions::new())
            .await
    }

    /// Register a new contributor account.
    pub async fn register_user(&self, user: &NewUser) -> ApiResult<()> {
        self.gateway
            .send_unit(Method::POST, "/api/v1/users", RequestOptions::json(user)?)
            .await
    }

    pub async fn get_user(&self, id: &str) -> ApiResult<User> {
        self.gateway
            .get_json(&format!("/api/v1/users/{}", segment(id)), RequestOptions::new())
            .await
    }

    /// Update a profile. The server may answer with the updated user or nothing.
    pub async fn update_user(&self, id: &str, update: &UserUpdate) -> ApiResult<Option<User>> {
        self.gateway
            .send_json(Method::PUT, &format!("/api/v1/users/{}", segment(id)), update)
            .await
    }

    /// Activate or reject a pending account.
    ///
    /// A 404 here usually means another administrator already decided.
    pub async fn validate_user(&self, id: &str, action: ValidationAction) -> ApiResult<()> {
        self.gateway
            .send_unit(
                Method::PATCH,
                &format!("/api/v1/users/{}", segment(id)),
                RequestOptions::json(&json!({ "action": action }))?,
            )
            .await
    }

    pub async fn delete_user(&self, id: &str) -> ApiResult<()> {
        self.gateway
            .send_unit(
                Method::DELETE,
                &format!("/api/v1/users/{}", segment(id)),
                RequestOptions::new(),
            )
            .await
    }
}
