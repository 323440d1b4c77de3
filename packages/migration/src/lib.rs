pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20250901_000001_institutes; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250901_000001_institutes::Migration)]
    }
}

/// Apply every pending migration and log how many are applied afterwards.
/// Used by the backend at startup and by the integration tests.
pub async fn migrate_up(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    tracing::info!(?backend, "applying migrations");

    match Migrator::up(db, None).await {
        Ok(()) => {
            let applied = count_applied_migrations(db).await.unwrap_or(0);
            tracing::info!(
                applied,
                defined = Migrator::migrations().len(),
                "migrations up to date"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "migration failed");
            Err(e)
        }
    }
}

/// Count the number of migrations that have been applied to the database.
/// Returns 0 if the migration table doesn't exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0), // Migration table doesn't exist yet
        Err(e) => Err(e),
    }
}
