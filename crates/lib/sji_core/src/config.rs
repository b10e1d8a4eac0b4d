//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Backend origin used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://test.saintjacquesinfo.eu";

/// Default per-request timeout: 30 seconds.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default freshness window for vocabulary lookups: 5 minutes.
pub const DEFAULT_VOCABULARY_TTL: Duration = Duration::from_secs(300);

/// Configuration for the API client and its session.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend origin, without trailing slash (e.g. "https://test.saintjacquesinfo.eu").
    pub base_url: String,
    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,
    /// How long a fetched vocabulary is served without refetching.
    pub vocabulary_ttl: Duration,
    /// File backing the credential store.
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                   | Default                                   |
    /// |----------------------------|-------------------------------------------|
    /// | `SJI_API_BASE_URL`         | `https://test.saintjacquesinfo.eu`        |
    /// | `SJI_REQUEST_TIMEOUT_SECS` | `30`                                      |
    /// | `SJI_VOCABULARY_TTL_SECS`  | `300`                                     |
    /// | `SJI_SESSION_FILE`         | `<data dir>/saint-jacques/session.json`   |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("SJI_API_BASE_URL")
                .map(|v| normalize_base_url(&v))
                .unwrap_or(defaults.base_url),
            request_timeout: env_secs("SJI_REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout),
            vocabulary_ttl: env_secs("SJI_VOCABULARY_TTL_SECS").unwrap_or(defaults.vocabulary_ttl),
            session_file: std::env::var("SJI_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
        }
    }

    /// Same defaults, pointed at another backend origin.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            vocabulary_ttl: DEFAULT_VOCABULARY_TTL,
            session_file: default_session_file(),
        }
    }
}

/// Path to the persisted session file.
pub fn default_session_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("saint-jacques")
        .join("session.json")
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn env_secs(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
