// @zen-component: API-ErrorTaxonomy
//
//! API error types.

use serde_json::{Value, json};
use sji_core::session::SessionError;
use thiserror::Error;

/// Convenience alias for client return types.
pub type ApiResult<T> = Result<T, ApiError>;

/// Every failure the client reports.
///
/// Only [`ApiError::Http`] comes from the server; all other variants report
/// status `0` so callers can tell "the server said no" from "we never got an
/// answer".
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        payload: Value,
    },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Invalid response: {message}")]
    Decode { message: String },

    #[error("Client configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// How a caller should react to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 401: credentials were dropped, log in again.
    SessionExpired,
    /// 403.
    Forbidden,
    /// 404: the item is gone or was already processed elsewhere.
    NotFound,
    /// 409: the action was already done.
    Conflict,
    /// Status 0: the server could not be reached.
    Unreachable,
    /// The caller abandoned the request.
    Cancelled,
    Other,
}

impl ApiError {
    pub(crate) fn network(e: &reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            "request timed out".to_string()
        } else {
            e.to_string()
        };
        ApiError::Network { message }
    }

    /// HTTP status, or `0` when no HTTP answer was received.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Http { status, .. } => *status,
            _ => 0,
        }
    }

    /// Raw error body as sent by the server, or a generic payload.
    pub fn payload(&self) -> Value {
        match self {
            ApiError::Http { payload, .. } => payload.clone(),
            ApiError::Network { .. } => json!({ "error": "network_error" }),
            ApiError::Cancelled => json!({ "error": "cancelled" }),
            ApiError::Decode { .. } => json!({ "error": "invalid_response" }),
            ApiError::Config(_) | ApiError::Session(_) => json!({ "error": "client_error" }),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Http { status, .. } => match status {
                401 => ErrorKind::SessionExpired,
                403 => ErrorKind::Forbidden,
                404 => ErrorKind::NotFound,
                409 => ErrorKind::Conflict,
                _ => ErrorKind::Other,
            },
            ApiError::Network { .. } => ErrorKind::Unreachable,
            ApiError::Cancelled => ErrorKind::Cancelled,
            _ => ErrorKind::Other,
        }
    }

    pub fn is_network(&self) -> bool {
        self.kind() == ErrorKind::Unreachable
    }

    /// Message to show an administrator.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::SessionExpired => {
                "Votre session a expiré. Veuillez vous reconnecter.".to_string()
            }
            ErrorKind::Forbidden => {
                "Vous n'avez pas les droits nécessaires pour cette action.".to_string()
            }
            ErrorKind::NotFound => {
                format!("{} (déjà traité ailleurs ? rafraîchissez la liste)", self)
            }
            ErrorKind::Conflict => "Cette action a déjà été effectuée.".to_string(),
            ErrorKind::Unreachable => {
                "Impossible de joindre le serveur. Vérifiez votre connexion.".to_string()
            }
            ErrorKind::Cancelled => "Requête annulée.".to_string(),
            ErrorKind::Other => self.to_string(),
        }
    }
}
