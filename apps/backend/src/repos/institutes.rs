//! Institute repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::institutes_sea as institutes_adapter;
use crate::auth::TenantId;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

#[derive(Debug, Clone, PartialEq)]
pub struct Institute {
    pub id: i32,
    pub name: String,
    pub created_at: time::OffsetDateTime,
}

impl Institute {
    /// Scope for acting inside this institute outside of a request, such as
    /// startup seeding.
    pub(crate) fn tenant(&self) -> TenantId {
        TenantId(self.id)
    }
}

pub async fn create_institute<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Institute, DomainError> {
    let institute = institutes_adapter::create_institute(conn, name)
        .await
        .map_err(map_db_err)?;
    Ok(Institute::from(institute))
}

pub async fn find_institute_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<Institute>, DomainError> {
    let institute = institutes_adapter::find_institute_by_name(conn, name)
        .await
        .map_err(map_db_err)?;
    Ok(institute.map(Institute::from))
}

impl From<crate::entities::institutes::Model> for Institute {
    fn from(model: crate::entities::institutes::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}
