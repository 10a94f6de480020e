//! Shared application state.

use std::sync::Arc;

use tally_db::Database;

use crate::auth::JwtManager;
use crate::config::ApiConfig;

/// State handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    db: Database,
    jwt: JwtManager,
}

impl AppState {
    /// Build the state from an open database and the loaded configuration.
    pub fn new(db: Database, config: &ApiConfig) -> Self {
        let jwt = JwtManager::new(&config.jwt_secret, config.access_token_expire_minutes);

        AppState {
            inner: Arc::new(Inner { db, jwt }),
        }
    }

    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    pub fn jwt(&self) -> &JwtManager {
        &self.inner.jwt
    }
}
