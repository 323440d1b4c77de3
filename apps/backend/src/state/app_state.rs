use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::auth::password::PasswordHasher;
use crate::auth::token::TokenAuthority;
use crate::error::AppError;
use crate::media::ImageHost;

/// Shared, read-only handles built once at startup and cloned into every
/// worker.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tokens: TokenAuthority,
    pub passwords: PasswordHasher,
    pub images: Arc<dyn ImageHost>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        security: SecurityConfig,
        images: Arc<dyn ImageHost>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            db,
            tokens: TokenAuthority::new(security),
            passwords: PasswordHasher::new()?,
            images,
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
