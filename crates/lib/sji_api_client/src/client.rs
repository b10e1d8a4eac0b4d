//! The API client: a gateway plus the shared vocabulary cache.

use std::sync::Arc;

use sji_core::config::ClientConfig;
use sji_core::session::CredentialStore;
use sji_core::vocabulary::VocabularyCache;
use tokio_util::sync::CancellationToken;

use crate::error::ApiResult;
use crate::gateway::Gateway;

/// Typed client for the heritage backend.
///
/// Cheap to clone; clones share the session and the vocabulary cache.
#[derive(Clone, Debug)]
pub struct SjiClient {
    pub(crate) gateway: Gateway,
    pub(crate) vocabularies: Arc<VocabularyCache>,
}

impl SjiClient {
    /// Client whose session lives in `config.session_file`.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        Self::with_store(config, CredentialStore::file(&config.session_file))
    }

    /// Client over an explicitly provided credential store.
    pub fn with_store(config: &ClientConfig, store: CredentialStore) -> ApiResult<Self> {
        Ok(Self {
            gateway: Gateway::new(config, store)?,
            vocabularies: Arc::new(VocabularyCache::with_ttl(config.vocabulary_ttl)),
        })
    }

    /// A client whose in-flight and future requests abort when `token` is
    /// cancelled. Session and cache stay shared with `self`.
    pub fn scoped(&self, token: CancellationToken) -> Self {
        Self {
            gateway: self.gateway.scoped(token),
            vocabularies: Arc::clone(&self.vocabularies),
        }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn session(&self) -> &CredentialStore {
        self.gateway.session()
    }

    pub fn vocabularies(&self) -> &VocabularyCache {
        &self.vocabularies
    }
}
