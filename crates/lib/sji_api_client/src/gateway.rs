// @zen-component: API-RequestGateway
//
//! HTTP request gateway.
//!
//! One primitive, [`Gateway::request`], issues every call to the backend:
//! it injects credentials, merges caller headers, maps non-2xx answers to
//! [`ApiError::Http`] and treats `201`, `204` and empty bodies as "no body".

use std::future::Future;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode, multipart};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use sji_core::config::ClientConfig;
use sji_core::session::CredentialStore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};

/// Request payload.
pub enum RequestBody {
    Json(Value),
    Multipart(multipart::Form),
}

/// Per-call options merged over the gateway defaults.
#[derive(Default)]
pub struct RequestOptions {
    pub body: Option<RequestBody>,
    /// Extra headers; these win over the defaults.
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying `body` serialized as JSON.
    pub fn json<B: Serialize + ?Sized>(body: &B) -> ApiResult<Self> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Decode {
            message: format!("request body: {e}"),
        })?;
        Ok(Self {
            body: Some(RequestBody::Json(value)),
            ..Self::default()
        })
    }

    pub fn multipart(form: multipart::Form) -> Self {
        Self {
            body: Some(RequestBody::Multipart(form)),
            ..Self::default()
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Shared request primitive bound to one backend origin and one session.
#[derive(Clone)]
pub struct Gateway {
    http: reqwest::Client,
    base_url: String,
    session: CredentialStore,
    cancel: Option<CancellationToken>,
}

impl Gateway {
    pub fn new(config: &ClientConfig, session: CredentialStore) -> ApiResult<Self> {
        let base = url::Url::parse(&config.base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL {}: {e}", config.base_url)))?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("http client: {e}")))?;

        Ok(Self {
            http,
            base_url: base.as_str().trim_end_matches('/').to_string(),
            session,
            cancel: None,
        })
    }

    /// A copy whose requests all abort once `token` is cancelled.
    pub fn scoped(&self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &CredentialStore {
        &self.session
    }

    /// Issue a request and return the parsed JSON body, if there is one.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<Option<Value>> {
        let url = format!("{}{}", self.base_url, path);
        let credential = self.session.get_token();

        let mut headers = HeaderMap::new();
        if !matches!(options.body, Some(RequestBody::Multipart(_))) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(cred) = &credential {
            match HeaderValue::from_str(&cred.authorization_value()) {
                Ok(v) => {
                    headers.insert(AUTHORIZATION, v);
                }
                Err(e) => warn!("stored token is not a valid header value: {e}"),
            }
        }
        for (name, value) in &options.headers {
            headers.insert(name.clone(), value.clone());
        }
        let authenticated = headers.contains_key(AUTHORIZATION);

        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        builder = match options.body {
            Some(RequestBody::Json(value)) => builder.body(value.to_string()),
            Some(RequestBody::Multipart(form)) => builder.multipart(form),
            None => builder,
        };

        debug!(%method, path, authenticated, "api request");
        let response = self
            .guarded(builder.send())
            .await?
            .map_err(|e| {
                warn!(%method, path, "api request failed: {e}");
                ApiError::network(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let bytes = self.guarded(response.bytes()).await?.unwrap_or_default();
            let payload: Value = serde_json::from_slice(&bytes).unwrap_or_else(|_| json!({}));
            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));

            if status == StatusCode::UNAUTHORIZED && authenticated {
                info!("session rejected by server, clearing credentials");
                if let Err(e) = self.session.clear_token() {
                    warn!("failed to clear rejected session: {e}");
                }
            }
            warn!(%method, path, status = status.as_u16(), "api error: {message}");
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
                payload,
            });
        }

        let empty_body = response
            .headers()
            .get(CONTENT_LENGTH)
            .is_some_and(|v| v.as_bytes() == b"0");
        if status == StatusCode::CREATED || status == StatusCode::NO_CONTENT || empty_body {
            return Ok(None);
        }

        let bytes = self
            .guarded(response.bytes())
            .await?
            .map_err(|e| ApiError::network(&e))?;
        if bytes.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| ApiError::Decode {
                message: format!("{method} {path}: {e}"),
            })
    }

    /// `GET` and decode a body that must be present.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let body = self.request(Method::GET, path, options).await?;
        decode_required(path, body)
    }

    /// Send `body` as JSON and decode the answer, if any.
    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .request(method, path, RequestOptions::json(body)?)
            .await?;
        decode_optional(path, body)
    }

    /// Issue a request whose answer body is ignored.
    pub async fn send_unit(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<()> {
        self.request(method, path, options).await.map(|_| ())
    }

    async fn guarded<F: Future>(&self, fut: F) -> ApiResult<F::Output> {
        match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(ApiError::Cancelled),
                out = fut => Ok(out),
            },
            None => Ok(fut.await),
        }
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url)
            .field("scoped", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}

/// Decode a body the endpoint always sends.
pub(crate) fn decode_required<T: DeserializeOwned>(path: &str, body: Option<Value>) -> ApiResult<T> {
    let value = body.ok_or_else(|| ApiError::Decode {
        message: format!("{path}: empty response"),
    })?;
    serde_json::from_value(value).map_err(|e| ApiError::Decode {
        message: format!("{path}: {e}"),
    })
}

pub(crate) fn decode_optional<T: DeserializeOwned>(
    path: &str,
    body: Option<Value>,
) -> ApiResult<Option<T>> {
    body.map(|v| decode_required(path, Some(v))).transpose()
}

/// Characters escaped inside a single path segment, `/` and `%` included.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode one path segment.
pub(crate) fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_escapes_separators() {
        assert_eq!(segment("42"), "42");
        assert_eq!(segment("a/b?c"), "a%2Fb%3Fc");
    }

    #[test]
    fn segment_uses_path_escaping_for_spaces_and_plus() {
        assert_eq!(segment("a b"), "a%20b");
        assert_eq!(segment("a+b"), "a+b");
        assert_eq!(segment("100%"), "100%25");
        assert_eq!(segment("Église"), "%C3%89glise");
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let config = ClientConfig::with_base_url("not a url");
        let err = Gateway::new(&config, CredentialStore::in_memory()).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn base_url_has_no_trailing_slash() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:8080");
        let gw = Gateway::new(&config, CredentialStore::in_memory()).unwrap();
        assert_eq!(gw.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn decode_required_rejects_empty_body() {
        let err = decode_required::<Value>("/api/v1/users", None).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }
}
