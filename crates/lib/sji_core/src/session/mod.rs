// @zen-component: SES-CredentialStore
//
//! Credential store: the single active session of this client.
//!
//! Holds the access token, its scheme, its absolute expiry and a display
//! summary of the logged-in user in a durable key/value backend, so a session
//! survives process restarts until it expires or the user logs out.

pub mod backend;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use thiserror::Error;
use tracing::{debug, warn};

pub use backend::{FileBackend, MemoryBackend};

use crate::jwt;
use crate::models::{Credential, UserClaims, UserSummary};

/// Storage key of the raw token.
pub const KEY_TOKEN: &str = "authToken";
/// Storage key of the token scheme (`Bearer`).
pub const KEY_TOKEN_TYPE: &str = "tokenType";
/// Storage key of the expiry, in unix milliseconds.
pub const KEY_EXPIRY: &str = "tokenExpiry";
/// Storage key of the JSON user summary.
pub const KEY_USER_DATA: &str = "userData";

/// Session storage errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session store poisoned")]
    Poisoned,

    #[error("Invalid token lifetime: {0} hours")]
    InvalidLifetime(f64),
}

/// Durable string key/value storage behind the credential store.
pub trait SessionBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// Explicitly constructed session context, cheap to clone and share.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn SessionBackend>,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn SessionBackend>) -> Self {
        Self { backend }
    }

    /// Store backed by process memory only.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Store backed by a JSON file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileBackend::new(path)))
    }

    /// Persist a token valid for `expires_in_hours` from now.
    ///
    /// A lifetime that is not finite or does not fit a timestamp is rejected
    /// and nothing is stored.
    pub fn set_token(
        &self,
        token: &str,
        token_type: &str,
        expires_in_hours: f64,
    ) -> Result<(), SessionError> {
        let expires_at = expiry_after(Utc::now(), expires_in_hours)
            .ok_or(SessionError::InvalidLifetime(expires_in_hours))?;
        self.set_token_expiring_at(token, token_type, expires_at)
    }

    /// Persist a token with an absolute expiry.
    pub fn set_token_expiring_at(
        &self,
        token: &str,
        token_type: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        self.backend.set(KEY_TOKEN, token)?;
        self.backend.set(KEY_TOKEN_TYPE, token_type)?;
        self.backend
            .set(KEY_EXPIRY, &expires_at.timestamp_millis().to_string())?;
        debug!(%expires_at, "session: token stored");
        Ok(())
    }

    /// The current credential, if one is stored and not expired.
    pub fn get_token(&self) -> Option<Credential> {
        self.get_token_at(Utc::now())
    }

    /// Like [`get_token`](Self::get_token) with an explicit clock.
    ///
    /// A partial or expired record is purged before returning `None`.
    pub fn get_token_at(&self, now: DateTime<Utc>) -> Option<Credential> {
        let token = self.read(KEY_TOKEN);
        let token_type = self.read(KEY_TOKEN_TYPE);
        let expires_at = self.read(KEY_EXPIRY).and_then(|raw| parse_expiry(&raw));

        match (token, token_type, expires_at) {
            (Some(token), Some(token_type), Some(expires_at)) if now < expires_at => {
                Some(Credential { token, token_type })
            }
            (None, None, None) => None,
            _ => {
                debug!("session: stored token missing or expired, purging");
                if let Err(e) = self.clear_token() {
                    warn!("session: failed to purge expired token: {e}");
                }
                None
            }
        }
    }

    /// Absolute expiry of the stored token, valid or not.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.read(KEY_EXPIRY).and_then(|raw| parse_expiry(&raw))
    }

    /// Claims of the current token, for client-side display decisions only.
    pub fn claims(&self) -> Option<UserClaims> {
        self.get_token().and_then(|c| jwt::extract_claims(&c.token))
    }

    pub fn set_user_data(&self, summary: &UserSummary) -> Result<(), SessionError> {
        let json = serde_json::to_string(summary)?;
        self.backend.set(KEY_USER_DATA, &json)
    }

    /// The stored user summary; malformed JSON reads as absent.
    pub fn user_data(&self) -> Option<UserSummary> {
        let raw = self.read(KEY_USER_DATA)?;
        match serde_json::from_str(&raw) {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!("session: stored user data is not valid JSON: {e}");
                None
            }
        }
    }

    /// Remove every session field.
    pub fn clear_token(&self) -> Result<(), SessionError> {
        for key in [KEY_TOKEN, KEY_TOKEN_TYPE, KEY_EXPIRY, KEY_USER_DATA] {
            self.backend.remove(key)?;
        }
        Ok(())
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(v) => v,
            Err(e) => {
                warn!(key, "session: read failed: {e}");
                None
            }
        }
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

fn expiry_after(now: DateTime<Utc>, hours: f64) -> Option<DateTime<Utc>> {
    let millis = hours * 3_600_000.0;
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    let lifetime = Duration::try_milliseconds(millis as i64)?;
    now.checked_add_signed(lifetime)
}

fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    let millis = raw.trim().parse::<i64>().ok()?;
    Utc.timestamp_millis_opt(millis).single()
}
