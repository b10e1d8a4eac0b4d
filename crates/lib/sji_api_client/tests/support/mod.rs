//! Mock backend helpers shared by the integration tests.

#![allow(dead_code)]

use axum::Router;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use sji_api_client::SjiClient;
use sji_core::config::ClientConfig;
use sji_core::session::CredentialStore;

/// Serve `app` on an ephemeral port and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });
    format!("http://{addr}")
}

/// Client with an in-memory session pointed at `base_url`.
pub fn client(base_url: &str) -> SjiClient {
    SjiClient::with_store(
        &ClientConfig::with_base_url(base_url),
        CredentialStore::in_memory(),
    )
    .expect("client")
}

/// Signed token carrying the claims the backend issues.
pub fn mint_token(user_id: &str, grade: &str) -> String {
    let claims = json!({
        "JWT_ID": user_id,
        "JWT_GRADE": grade,
        "exp": chrono::Utc::now().timestamp() + 3600,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("encode token")
}

/// A base URL nothing listens on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}
