//! # sji_core
//!
//! Core domain logic for the Saint-Jacques heritage admin client: models,
//! client configuration, the credential store, JWT claim reading, the
//! vocabulary cache and the search query builder.

pub mod config;
pub mod jwt;
pub mod models;
pub mod search;
pub mod session;
pub mod vocabulary;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
