//! Shared application state.

use std::sync::Arc;

use classroom_core::domain::FileStore;
use sea_orm::DatabaseConnection;

use crate::config::ServerConfig;
use crate::file_store::LocalFileStore;
use crate::repository::Repositories;
use crate::service::Services;
use crate::session::{JwtSessions, SessionResolver};

/// Everything a handler can reach; immutable after start-up.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub sessions: Arc<dyn SessionResolver>,
    pub files: Arc<dyn FileStore>,
    pub services: Services,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        repos: Repositories,
        sessions: Arc<dyn SessionResolver>,
        files: Arc<dyn FileStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            sessions,
            services: Services::new(repos, files.clone()),
            files,
        }
    }

    /// SeaORM repositories, JWT sessions and local-disk uploads, all taken
    /// from `config`.
    pub fn from_config(config: ServerConfig, db: DatabaseConnection) -> Self {
        let sessions = Arc::new(JwtSessions::new(
            &config.session_secret,
            config.session_ttl_hours,
        ));
        let files = Arc::new(LocalFileStore::new(
            config.upload_dir.clone(),
            config.public_base_url.clone(),
        ));

        Self::new(config, Repositories::sea_orm(db), sessions, files)
    }
}
