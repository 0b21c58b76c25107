use std::path::Path;
use std::sync::Arc;

use crate::auth::jwt::JwtConfig;
use crate::config::ServerConfig;

/// Handler state: the Postgres pool plus read-only configuration.
#[derive(Clone)]
pub struct AppState {
    pub pool: faena_db::DbPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: faena_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    pub fn jwt(&self) -> &JwtConfig {
        &self.config.jwt
    }

    /// Root under which attachments are stored and served from `/uploads`.
    pub fn upload_dir(&self) -> &Path {
        &self.config.upload_dir
    }
}
