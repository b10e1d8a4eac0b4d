//! Authentication models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Account grade carried in the `JWT_GRADE` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Grade {
    Admin,
    Active,
    #[serde(other)]
    Unknown,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Admin => "ADMIN",
            Grade::Active => "ACTIVE",
            Grade::Unknown => "UNKNOWN",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Grade::Admin)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims the UI relies on, read from an unverified access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    pub user_id: String,
    pub grade: Grade,
}

/// Token and scheme ready to go into an `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub token_type: String,
}

impl Credential {
    /// `<type> <token>`, e.g. `Bearer eyJ...`.
    pub fn authorization_value(&self) -> String {
        format!("{} {}", self.token_type, self.token)
    }
}

/// Body returned by `POST /api/v1/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Token lifetime in hours.
    pub expires_in: f64,
    #[serde(default)]
    pub firstname: Option<String>,
}

/// Display-oriented summary of the logged-in user, persisted next to the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub firstname: Option<String>,
    pub email: String,
    pub role: String,
    pub user_id: Option<String>,
    pub grade: Option<Grade>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_parses_known_and_unknown_values() {
        let g: Grade = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(g, Grade::Admin);
        let g: Grade = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(g, Grade::Unknown);
    }

    #[test]
    fn authorization_value_joins_type_and_token() {
        let c = Credential {
            token: "abc".into(),
            token_type: "Bearer".into(),
        };
        assert_eq!(c.authorization_value(), "Bearer abc");
    }
}
