use std::time::Duration;

use migration::migrate_up;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Open a pool for `database_url`. Does not run migrations.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(database_url.to_owned());

    // An in-memory SQLite database lives and dies with its connection, so
    // the pool must hold exactly one.
    if database_url.starts_with("sqlite") && database_url.contains(":memory:") {
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(10)
            .connect_timeout(Duration::from_secs(5))
            .acquire_timeout(Duration::from_secs(5));
    }
    opts.sqlx_logging(false);

    let conn = Database::connect(opts).await?;
    info!(backend = ?conn.get_database_backend(), "database connected");
    Ok(conn)
}

/// Connect and, when asked, bring the schema up to date.
pub async fn bootstrap_db(
    database_url: &str,
    auto_migrate: bool,
) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(database_url).await?;
    if auto_migrate {
        migrate_up(&conn).await.map_err(|e| {
            AppError::internal(ErrorCode::DbError, format!("migration failed: {e}"))
        })?;
    }
    Ok(conn)
}
