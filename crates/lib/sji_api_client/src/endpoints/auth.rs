//! Login, logout and the current session.

use serde::Serialize;
use sji_core::jwt;
use sji_core::models::{LoginResponse, UserClaims, UserSummary};
use tracing::info;

use crate::client::SjiClient;
use crate::error::ApiResult;
use crate::gateway::{RequestOptions, decode_required};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl SjiClient {
    /// Exchange credentials for a token and store the new session.
    ///
    /// Nothing is stored unless the server answers 2xx.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<UserSummary> {
        let path = "/api/v1/login";
        let body = self
            .gateway
            .request(
                reqwest::Method::POST,
                path,
                RequestOptions::json(&LoginRequest { email, password })?,
            )
            .await?;
        let resp: LoginResponse = decode_required(path, body)?;

        let session = self.session();
        session.set_token(&resp.token, &resp.token_type, resp.expires_in)?;

        let claims = jwt::extract_claims(&resp.token);
        let summary = UserSummary {
            firstname: resp.firstname,
            email: email.to_string(),
            role: claims
                .as_ref()
                .map(|c| c.grade.as_str())
                .unwrap_or("UNKNOWN")
                .to_string(),
            user_id: claims.as_ref().map(|c| c.user_id.clone()),
            grade: claims.map(|c| c.grade),
        };
        session.set_user_data(&summary)?;

        info!(email, role = %summary.role, "logged in");
        Ok(summary)
    }

    /// Forget the stored session. No network call.
    pub fn logout(&self) -> ApiResult<()> {
        self.session().clear_token()?;
        info!("logged out");
        Ok(())
    }

    /// Summary of the logged-in user while the session is valid.
    pub fn current_user(&self) -> Option<UserSummary> {
        self.session().get_token()?;
        self.session().user_data()
    }

    /// Claims read from the current token, for display decisions only.
    pub fn claims(&self) -> Option<UserClaims> {
        self.session().claims()
    }

    pub fn is_admin(&self) -> bool {
        self.claims().is_some_and(|c| c.grade.is_admin())
    }
}
