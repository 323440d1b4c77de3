//! User repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::users_sea::{self as users_adapter, UserCreate, UserUpdate};
use crate::auth::TenantId;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;

/// User domain model. Carries no password material and is safe to return
/// from handlers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i32,
    pub institute_id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

/// A user together with the stored hash, for credential checks only.
#[derive(Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

impl std::fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentials")
            .field("user", &self.user)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
}

fn user_not_found(user_id: i32) -> DomainError {
    DomainError::not_found(NotFoundKind::User, format!("user {user_id} not found"))
}

pub async fn find_credentials_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<UserCredentials>, DomainError> {
    let user = users_adapter::find_user_by_email(conn, email)
        .await
        .map_err(map_db_err)?;
    Ok(user.map(UserCredentials::from))
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    new_user: NewUser,
) -> Result<User, DomainError> {
    let dto = UserCreate {
        institute_id: tenant.get(),
        name: new_user.name,
        email: new_user.email,
        password_hash: new_user.password_hash,
        role: new_user.role,
        is_active: new_user.is_active,
    };
    let user = users_adapter::create_user(conn, dto)
        .await
        .map_err(map_db_err)?;
    Ok(User::from(user))
}

pub async fn find_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    user_id: i32,
) -> Result<User, DomainError> {
    users_adapter::find_user(conn, tenant.get(), user_id)
        .await
        .map_err(map_db_err)?
        .map(User::from)
        .ok_or_else(|| user_not_found(user_id))
}

pub async fn find_user_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    email: &str,
) -> Result<User, DomainError> {
    users_adapter::find_user_by_email_in_institute(conn, tenant.get(), email)
        .await
        .map_err(map_db_err)?
        .map(User::from)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "user not found"))
}

pub async fn list_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
) -> Result<Vec<User>, DomainError> {
    let users = users_adapter::list_users(conn, tenant.get())
        .await
        .map_err(map_db_err)?;
    Ok(users.into_iter().map(User::from).collect())
}

pub async fn update_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    user_id: i32,
    update: UserUpdate,
) -> Result<User, DomainError> {
    users_adapter::update_user(conn, tenant.get(), user_id, update)
        .await
        .map_err(map_db_err)?
        .map(User::from)
        .ok_or_else(|| user_not_found(user_id))
}

pub async fn update_password<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    user_id: i32,
    password_hash: String,
) -> Result<(), DomainError> {
    users_adapter::update_password(conn, tenant.get(), user_id, password_hash)
        .await
        .map_err(map_db_err)?
        .map(|_| ())
        .ok_or_else(|| user_not_found(user_id))
}

pub async fn disable_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    user_id: i32,
) -> Result<User, DomainError> {
    let update = UserUpdate {
        is_active: Some(false),
        ..UserUpdate::default()
    };
    update_user(conn, tenant, user_id, update).await
}

// Conversions between SeaORM models and domain models

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            institute_id: model.institute_id,
            name: model.name,
            email: model.email,
            role: model.role,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<crate::entities::users::Model> for UserCredentials {
    fn from(mut model: crate::entities::users::Model) -> Self {
        let password_hash = std::mem::take(&mut model.password);
        Self {
            user: User::from(model),
            password_hash,
        }
    }
}
