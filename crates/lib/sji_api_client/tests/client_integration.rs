//! End-to-end tests against an in-process mock of the heritage backend.

mod support;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use sji_api_client::{ApiError, CancellationToken, ErrorKind, RequestOptions};
use sji_core::models::UserSummary;
use sji_core::session::SessionError;
use sji_core::models::{Grade, RecordCategory, RecordDetail};
use sji_core::vocabulary::VocabularyKind;

use support::{client, dead_url, mint_token, spawn};

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "secret" {
        Json(json!({
            "token": mint_token("7", "ADMIN"),
            "token_type": "Bearer",
            "expires_in": 2,
            "firstname": "Anne",
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Identifiants invalides" })),
        )
            .into_response()
    }
}

async fn all_users(headers: HeaderMap) -> Response {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !auth.starts_with("Bearer ey") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Unauthorized" })),
        )
            .into_response();
    }
    Json(json!([
        { "id": 1, "email": "anne@example.fr", "grade": "ADMIN" },
        { "id": "2", "email": "paul@example.fr", "grade": "ACTIVE" },
    ]))
    .into_response()
}

fn admin_app() -> Router {
    Router::new()
        .route("/api/v1/login", post(login))
        .route("/api/v1/admin/users", get(all_users))
}

#[tokio::test]
async fn login_stores_session_and_authorizes_admin_calls() {
    let base = spawn(admin_app()).await;
    let api = client(&base);

    let summary = api.login("anne@example.fr", "secret").await.expect("login");
    assert_eq!(summary.role, "ADMIN");
    assert_eq!(summary.user_id.as_deref(), Some("7"));
    assert_eq!(summary.firstname.as_deref(), Some("Anne"));
    assert!(api.is_admin());
    assert_eq!(api.claims().map(|c| c.grade), Some(Grade::Admin));
    assert_eq!(api.current_user(), Some(summary));

    let users = api.get_all_users().await.expect("users");
    assert_eq!(users.len(), 2);
    assert_eq!(users[1].id, "2");
}

#[tokio::test]
async fn failed_login_stores_nothing() {
    let base = spawn(admin_app()).await;
    let api = client(&base);

    let err = api.login("anne@example.fr", "wrong").await.unwrap_err();
    assert_eq!(err.status(), 401);
    assert_eq!(err.to_string(), "Identifiants invalides");
    assert!(api.session().get_token().is_none());
    assert!(api.current_user().is_none());
}

#[tokio::test]
async fn logout_clears_the_session() {
    let base = spawn(admin_app()).await;
    let api = client(&base);
    api.login("anne@example.fr", "secret").await.expect("login");

    api.logout().expect("logout");
    assert!(api.session().get_token().is_none());
    assert!(!api.is_admin());
}

#[tokio::test]
async fn rejected_session_is_cleared() {
    let base = spawn(admin_app()).await;
    let api = client(&base);
    api.session()
        .set_token("stale", "Bearer", 1.0)
        .expect("seed token");

    let err = api.get_all_users().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SessionExpired);
    assert!(api.session().get_token().is_none());
}

#[tokio::test]
async fn missing_record_reports_its_id() {
    let app = Router::new().route(
        "/api/v1/monuments_lieux/{id}",
        get(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Not found" })),
            )
        }),
    );
    let api = client(&spawn(app).await);

    let err = api
        .get_record_detail(RecordCategory::MonumentsLieux, "99")
        .await
        .unwrap_err();
    assert_eq!(err.status(), 404);
    assert_eq!(err.to_string(), "Fiche non trouvée pour l'ID: 99");
    assert_eq!(err.payload()["message"], "Not found");
}

#[tokio::test]
async fn record_detail_decodes_by_category() {
    let app = Router::new().route(
        "/api/v1/monuments_lieux/{id}",
        get(|| async {
            Json(json!({
                "id": 12,
                "title": "Cathédrale",
                "natures": [{ "id": 1, "name": "Église" }],
                "parent_id": 4,
            }))
        }),
    );
    let api = client(&spawn(app).await);

    let detail = api
        .get_record_detail(RecordCategory::MonumentsLieux, "12")
        .await
        .expect("detail");
    let RecordDetail::Monument(monument) = &detail else {
        panic!("expected a monument, got {detail:?}");
    };
    assert_eq!(monument.natures[0].name, "Église");
    assert_eq!(detail.envelope().id, "12");
    assert!(detail.is_modification());
}

#[tokio::test]
async fn created_and_empty_answers_have_no_body() {
    let app = Router::new()
        .route(
            "/api/v1/monuments_lieux",
            post(|| async { (StatusCode::CREATED, Json(json!({ "id": 3 }))) }),
        )
        .route(
            "/api/v1/monuments_lieux/{id}",
            put(|| async { StatusCode::OK }),
        )
        .route(
            "/api/v1/users/{id}",
            delete(|| async { StatusCode::NO_CONTENT }),
        );
    let api = client(&spawn(app).await);

    let created = api
        .create_record(RecordCategory::MonumentsLieux, &json!({ "title": "Abbaye" }))
        .await
        .expect("create");
    assert!(created.is_none());

    let updated = api
        .update_record(RecordCategory::MonumentsLieux, "3", &json!({ "title": "Abbaye" }))
        .await
        .expect("update");
    assert!(updated.is_none());

    api.delete_user("5").await.expect("delete");
}

#[tokio::test]
async fn error_without_json_body_gets_generic_message() {
    let app = Router::new().route(
        "/api/v1/pays",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let api = client(&spawn(app).await);

    let err = api.countries().await.unwrap_err();
    assert_eq!(err.status(), 500);
    assert_eq!(err.to_string(), "HTTP error! status: 500");
    assert_eq!(err.payload(), json!({}));
    assert_eq!(err.kind(), ErrorKind::Other);
}

#[tokio::test]
async fn unreachable_server_reports_status_zero() {
    let api = client(&dead_url().await);

    let err = api.countries().await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }), "got {err:?}");
    assert_eq!(err.status(), 0);
    assert!(err.is_network());
    assert_eq!(
        err.user_message(),
        "Impossible de joindre le serveur. Vérifiez votre connexion."
    );
}

#[tokio::test]
async fn cancelled_request_stops_waiting() {
    let app = Router::new().route(
        "/api/v1/regions",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Json(json!([]))
        }),
    );
    let api = client(&spawn(app).await);
    let token = CancellationToken::new();
    let scoped = api.scoped(token.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let err = tokio::time::timeout(Duration::from_secs(5), scoped.regions())
        .await
        .expect("cancellation should end the call")
        .unwrap_err();
    assert!(matches!(err, ApiError::Cancelled));
    assert_eq!(err.status(), 0);
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(err.user_message(), "Requête annulée.");
    canceller.await.expect("canceller");
}

#[tokio::test]
async fn vocabulary_is_fetched_once_per_ttl() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/api/v1/themes",
            get(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(json!([{ "id": 5, "name": "Pèlerinage" }]))
            }),
        )
        .with_state(Arc::clone(&hits));
    let api = client(&spawn(app).await);

    let first = api.vocabulary(VocabularyKind::Themes).await.expect("first");
    let second = api
        .scoped(CancellationToken::new())
        .vocabulary(VocabularyKind::Themes)
        .await
        .expect("second");
    assert_eq!(first, second);
    assert_eq!(first[0].numeric_id(), Some(5));
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    api.fetch_vocabulary(VocabularyKind::Themes)
        .await
        .expect("uncached");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn media_upload_is_multipart_without_json_content_type() {
    let app = Router::new().route(
        "/api/v1/medias",
        post(|headers: HeaderMap, body: Bytes| async move {
            let content_type = headers
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let text = String::from_utf8_lossy(&body);
            if content_type.starts_with("multipart/form-data")
                && text.contains("name=\"file\"")
                && text.contains("filename=\"coquille.jpg\"")
            {
                Json(json!({ "id": 41 })).into_response()
            } else {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": content_type })))
                    .into_response()
            }
        }),
    );
    let api = client(&spawn(app).await);

    let media = api
        .upload_media("coquille.jpg", "image/jpeg", vec![0xff, 0xd8, 0xff])
        .await
        .expect("upload");
    assert_eq!(media.id, "41");
}

#[tokio::test]
async fn unrepresentable_token_lifetime_fails_login_without_panicking() {
    let app = Router::new().route(
        "/api/v1/login",
        post(|| async {
            Json(json!({
                "token": mint_token("7", "ADMIN"),
                "token_type": "Bearer",
                "expires_in": 1e300,
            }))
        }),
    );
    let api = client(&spawn(app).await);

    let err = api.login("anne@example.fr", "secret").await.unwrap_err();
    assert!(
        matches!(err, ApiError::Session(SessionError::InvalidLifetime(_))),
        "got {err:?}"
    );
    assert_eq!(err.status(), 0);
    assert!(api.session().get_token().is_none());
    assert!(api.current_user().is_none());
}

async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let read = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    Json(json!({
        "contentType": read(header::CONTENT_TYPE),
        "authorization": read(header::AUTHORIZATION),
    }))
}

#[tokio::test]
async fn caller_headers_override_defaults() {
    let app = Router::new().route("/api/v1/echo", post(echo_headers));
    let api = client(&spawn(app).await);
    api.session()
        .set_token("stored", "Bearer", 1.0)
        .expect("seed token");

    let options = RequestOptions::json(&json!({ "title": "Abbaye" }))
        .expect("options")
        .header(
            CONTENT_TYPE,
            HeaderValue::from_static("application/merge-patch+json"),
        )
        .header(AUTHORIZATION, HeaderValue::from_static("Bearer caller"));

    let echoed = api
        .gateway()
        .request(Method::POST, "/api/v1/echo", options)
        .await
        .expect("echo")
        .expect("body");
    assert_eq!(echoed["contentType"], "application/merge-patch+json");
    assert_eq!(echoed["authorization"], "Bearer caller");

    let defaults = api
        .gateway()
        .request(Method::POST, "/api/v1/echo", RequestOptions::new())
        .await
        .expect("echo")
        .expect("body");
    assert_eq!(defaults["contentType"], "application/json");
    assert_eq!(defaults["authorization"], "Bearer stored");
}

#[tokio::test]
async fn caller_authorization_counts_as_authenticated() {
    let app = Router::new().route(
        "/api/v1/users",
        get(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Unauthorized" })),
            )
        }),
    );
    let api = client(&spawn(app).await);
    // Leftover user data with no token: only a purge removes it.
    api.session()
        .set_user_data(&UserSummary {
            firstname: None,
            email: "anne@example.fr".into(),
            role: "ADMIN".into(),
            user_id: Some("7".into()),
            grade: Some(Grade::Admin),
        })
        .expect("seed user data");

    let options =
        RequestOptions::new().header(AUTHORIZATION, HeaderValue::from_static("Bearer caller"));
    let err = api
        .gateway()
        .request(Method::GET, "/api/v1/users", options)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SessionExpired);
    assert!(api.session().user_data().is_none());
}
