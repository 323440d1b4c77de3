//! SeaORM adapter for user repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, NotSet,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::users;

pub mod dto;

pub use dto::{UserCreate, UserUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError via map_db_err.

/// Email is unique across institutes, so login resolves it without a tenant.
pub async fn find_user_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn find_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    institute_id: i32,
    user_id: i32,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id)
        .filter(users::Column::InstituteId.eq(institute_id))
        .one(conn)
        .await
}

pub async fn find_user_by_email_in_institute<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    institute_id: i32,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::InstituteId.eq(institute_id))
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn list_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    institute_id: i32,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::InstituteId.eq(institute_id))
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: NotSet,
        institute_id: Set(dto.institute_id),
        name: Set(dto.name),
        email: Set(dto.email),
        password: Set(dto.password_hash),
        role: Set(dto.role),
        is_active: Set(dto.is_active),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(conn).await
}

/// `Ok(None)` when the user does not exist in the institute.
pub async fn update_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    institute_id: i32,
    user_id: i32,
    dto: UserUpdate,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    let Some(existing) = find_user(conn, institute_id, user_id).await? else {
        return Ok(None);
    };

    let mut active = existing.into_active_model();
    if let Some(name) = dto.name {
        active.name = Set(name);
    }
    if let Some(email) = dto.email {
        active.email = Set(email);
    }
    if let Some(role) = dto.role {
        active.role = Set(role);
    }
    if let Some(is_active) = dto.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(time::OffsetDateTime::now_utc());

    active.update(conn).await.map(Some)
}

pub async fn update_password<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    institute_id: i32,
    user_id: i32,
    password_hash: String,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    let Some(existing) = find_user(conn, institute_id, user_id).await? else {
        return Ok(None);
    };

    let mut active = existing.into_active_model();
    active.password = Set(password_hash);
    active.updated_at = Set(time::OffsetDateTime::now_utc());

    active.update(conn).await.map(Some)
}
