use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::infra::db::bootstrap_db;
use crate::media::{CloudinaryClient, ImageHost, MemoryImageHost};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for `AppState`, shared by `main` and the integration tests.
pub struct StateBuilder {
    security_config: SecurityConfig,
    database_url: Option<String>,
    auto_migrate: bool,
    db: Option<DatabaseConnection>,
    images: Option<Arc<dyn ImageHost>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::for_tests(),
            database_url: None,
            auto_migrate: true,
            db: None,
            images: None,
        }
    }

    /// Everything `main` needs: key, datastore URL and image host.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let images: Arc<dyn ImageHost> = match &config.cloudinary {
            Some(cloudinary) => {
                let client = CloudinaryClient::new(cloudinary.clone(), config.upload_timeout)
                    .map_err(|e| AppError::internal(ErrorCode::ConfigError, e.to_string()))?;
                info!("image host: cloudinary");
                Arc::new(client)
            }
            None => {
                warn!("Cloudinary not configured; photos are kept in memory and lost on restart");
                Arc::new(MemoryImageHost::new())
            }
        };

        Ok(Self::new()
            .with_security(config.security.clone())
            .with_database_url(&config.database_url, config.auto_migrate)
            .with_images(images))
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_database_url(mut self, url: &str, auto_migrate: bool) -> Self {
        self.database_url = Some(url.to_owned());
        self.auto_migrate = auto_migrate;
        self
    }

    /// Use an already opened (and migrated) connection.
    pub fn with_db(mut self, db: DatabaseConnection) -> Self {
        self.db = Some(db);
        self
    }

    pub fn with_images(mut self, images: Arc<dyn ImageHost>) -> Self {
        self.images = Some(images);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let db = match (self.db, self.database_url) {
            (Some(db), _) => db,
            (None, Some(url)) => bootstrap_db(&url, self.auto_migrate).await?,
            (None, None) => return Err(AppError::config("no database configured")),
        };
        let images: Arc<dyn ImageHost> = match self.images {
            Some(images) => images,
            None => Arc::new(MemoryImageHost::new()),
        };

        AppState::new(db, self.security_config, images)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn build_requires_a_database() {
        let err = build_state().build().await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigError);
    }

    #[tokio::test]
    async fn build_with_in_memory_sqlite() {
        let state = build_state()
            .with_database_url("sqlite::memory:", true)
            .build()
            .await
            .unwrap();
        assert_eq!(state.tokens.token_duration(), time::Duration::hours(1));
    }

    #[tokio::test]
    async fn prepared_connection_wins_over_url() {
        let db = bootstrap_db("sqlite::memory:", true).await.unwrap();
        let state = build_state()
            .with_db(db)
            .with_database_url("postgres://unreachable.invalid/none", false)
            .build()
            .await
            .unwrap();
        assert!(crate::repos::institutes::find_institute_by_name(&state.db, "nobody")
            .await
            .unwrap()
            .is_none());
    }
}
