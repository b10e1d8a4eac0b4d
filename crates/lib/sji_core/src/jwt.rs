// @zen-component: AUTH-ClaimReader
//
//! Unverified JWT claim reading.
//!
//! The signature is NOT checked: claims read here only drive what the client
//! shows (admin menus, "my history"). The backend re-checks every request.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::Value;
use tracing::debug;

use crate::models::{Grade, UserClaims};

/// Claim holding the user id.
pub const CLAIM_USER_ID: &str = "JWT_ID";

/// Claim holding the account grade.
pub const CLAIM_GRADE: &str = "JWT_GRADE";

/// Standard alphabet, padding optional (JWT segments are unpadded).
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode the payload segment of a compact JWT into a JSON value.
///
/// Returns `None` unless the token has exactly three segments and the middle
/// one is base64url-encoded JSON.
pub fn decode(token: &str) -> Option<Value> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        debug!(segments = segments.len(), "jwt: wrong segment count");
        return None;
    }

    let payload = segments[1].replace('-', "+").replace('_', "/");
    let bytes = match PAYLOAD_ENGINE.decode(payload.as_bytes()) {
        Ok(b) => b,
        Err(e) => {
            debug!("jwt: payload is not base64: {e}");
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(v) => Some(v),
        Err(e) => {
            debug!("jwt: payload is not JSON: {e}");
            None
        }
    }
}

/// Read user id and grade from a token. Both claims must be present.
pub fn extract_claims(token: &str) -> Option<UserClaims> {
    let claims = decode(token)?;

    let user_id = match claims.get(CLAIM_USER_ID)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let grade: Grade = serde_json::from_value(claims.get(CLAIM_GRADE)?.clone()).ok()?;

    Some(UserClaims { user_id, grade })
}
