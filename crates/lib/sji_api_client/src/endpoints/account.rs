//! Password reset, email confirmation and the contact form.

use reqwest::Method;
use serde_json::json;
use sji_core::models::ContactMessage;

use crate::client::SjiClient;
use crate::error::ApiResult;
use crate::gateway::{RequestOptions, segment};

impl SjiClient {
    /// Ask for a reset link to be mailed to `email`.
    pub async fn request_password_reset(&self, email: &str) -> ApiResult<()> {
        self.gateway
            .send_unit(
                Method::POST,
                "/api/v1/password-reset",
                RequestOptions::json(&json!({ "email": email }))?,
            )
            .await
    }

    /// Succeeds while the reset token is still valid.
    pub async fn check_reset_token(&self, token: &str) -> ApiResult<()> {
        self.gateway
            .send_unit(
                Method::GET,
                &format!("/api/v1/password-reset/{}", segment(token)),
                RequestOptions::new(),
            )
            .await
    }

    pub async fn reset_password(&self, token: &str, password: &str) -> ApiResult<()> {
        self.gateway
            .send_unit(
                Method::POST,
                &format!("/api/v1/password-reset/{}", segment(token)),
                RequestOptions::json(&json!({ "password": password }))?,
            )
            .await
    }

    /// Confirm ownership of an email address.
    pub async fn validate_email(&self, token: &str) -> ApiResult<()> {
        self.gateway
            .send_unit(
                Method::GET,
                &format!("/api/v1/email/{}/validate", segment(token)),
                RequestOptions::new(),
            )
            .await
    }

    pub async fn send_contact(&self, message: &ContactMessage) -> ApiResult<()> {
        self.gateway
            .send_unit(Method::POST, "/api/v1/contact", RequestOptions::json(message)?)
            .await
    }
}
