//! Application state management
//!
//! Shared resources handed to every handler through axum's state
//! extraction. All fields are cheap to clone.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::rate_limit::RateLimiter;
use crate::store::{OwnerStore, Store};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Document store for all owners
    pub store: Arc<dyn Store>,
    /// Request counter backend
    pub limiter: Arc<dyn RateLimiter>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
}

impl AppState {
    /// Derives the JWT keys once; call at startup.
    pub fn new(store: Arc<dyn Store>, limiter: Arc<dyn RateLimiter>, config: AppConfig) -> Self {
        let jwt = JwtService::new(
            &config.jwt.secret,
            config.jwt.access_token_expiry_secs,
            config.jwt.refresh_token_expiry_secs,
        );

        Self {
            store,
            limiter,
            config: Arc::new(config),
            jwt,
        }
    }

    #[inline]
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Typed document access for one owner
    pub fn owner_store(&self, owner_key: &str) -> OwnerStore {
        OwnerStore::new(self.store.clone(), owner_key)
    }

    #[inline]
    pub fn limiter(&self) -> &dyn RateLimiter {
        self.limiter.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::MemoryRateLimiter;
    use crate::store::MemoryStore;

    fn state() -> AppState {
        AppState::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryRateLimiter::new()),
            AppConfig::default(),
        )
    }

    #[test]
    fn test_jwt_service_is_precomputed() {
        let state = state();
        let token = state.jwt().generate_access_token("owner-1", false).unwrap();
        assert!(!token.is_empty());
    }

    #[test]
    fn test_owner_store_is_scoped() {
        let state = state();
        let docs = state.owner_store("owner-1");
        assert_eq!(docs.owner(), "owner-1");
        assert_eq!(state.store().backend_name(), "memory");
    }
}
