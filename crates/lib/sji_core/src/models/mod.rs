//! Domain models exchanged with the heritage backend.
//!
//! The backend is loose about identifier types (the same id may arrive as
//! `7` or `"7"`), so every id is normalized to a `String` on the way in.

pub mod auth;
pub mod contribution;
pub mod filter;
pub mod record;
pub mod search;
pub mod user;

pub use auth::{Credential, Grade, LoginResponse, UserClaims, UserSummary};
pub use contribution::{ContributionEvent, Paginated, Pagination};
pub use filter::{FilterOption, GeoOption};
pub use record::{
    DraftSummary, Individual, LegalEntity, Media, Monument, Furniture, PersonRef, RecordCategory,
    RecordDetail, RecordEnvelope, UnknownCategory,
};
pub use search::{SearchHit, SearchResults};
pub use user::{ContactMessage, MediaUpload, NewUser, User, UserUpdate, ValidationAction};

/// Serde helpers for ids that may be JSON numbers or strings.
pub(crate) mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Int(i64),
        Float(f64),
    }

    impl From<StringOrNumber> for String {
        fn from(v: StringOrNumber) -> Self {
            match v {
                StringOrNumber::String(s) => s,
                StringOrNumber::Int(n) => n.to_string(),
                StringOrNumber::Float(f) => f.to_string(),
            }
        }
    }

    pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        StringOrNumber::deserialize(deserializer).map(String::from)
    }

    pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<StringOrNumber>::deserialize(deserializer).map(|v| v.map(String::from))
    }
}
