//! Shared application state.

use ecoscore_analysis::ImpactAnalyzer;
use ecoscore_auth::{JwtManager, JwtState, PasswordHasher};
use ecoscore_core::EcoScoreConfig;
use ecoscore_store::SqliteStore;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: EcoScoreConfig,
    pub store: SqliteStore,
    pub analyzer: ImpactAnalyzer,
    pub jwt: JwtManager,
    pub hasher: PasswordHasher,
}

impl AppState {
    pub fn new(config: EcoScoreConfig, store: SqliteStore, analyzer: ImpactAnalyzer) -> Self {
        let jwt = JwtManager::new(&config.jwt_secret);
        Self {
            config,
            store,
            analyzer,
            jwt,
            hasher: PasswordHasher::new(),
        }
    }
}

impl JwtState for AppState {
    fn jwt(&self) -> &JwtManager {
        &self.jwt
    }
}
