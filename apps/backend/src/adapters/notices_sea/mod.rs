//! SeaORM adapter for notices.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, NotSet,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::notices;

pub mod dto;

pub use dto::{NoticeCreate, NoticeUpdate};

pub async fn create_notice<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: NoticeCreate,
) -> Result<notices::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let notice = notices::ActiveModel {
        id: NotSet,
        institute_id: Set(dto.institute_id),
        title: Set(dto.title),
        description: Set(dto.description),
        is_published: Set(dto.is_published),
        publish_date: Set(dto.publish_date),
        created_at: Set(now),
        updated_at: Set(now),
    };

    notice.insert(conn).await
}

pub async fn find_notice<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    institute_id: i32,
    notice_id: i32,
) -> Result<Option<notices::Model>, sea_orm::DbErr> {
    notices::Entity::find_by_id(notice_id)
        .filter(notices::Column::InstituteId.eq(institute_id))
        .one(conn)
        .await
}

/// Newest first.
pub async fn list_notices<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    institute_id: i32,
) -> Result<Vec<notices::Model>, sea_orm::DbErr> {
    notices::Entity::find()
        .filter(notices::Column::InstituteId.eq(institute_id))
        .order_by_desc(notices::Column::CreatedAt)
        .order_by_desc(notices::Column::Id)
        .all(conn)
        .await
}

pub async fn update_notice<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    institute_id: i32,
    notice_id: i32,
    dto: NoticeUpdate,
) -> Result<Option<notices::Model>, sea_orm::DbErr> {
    let Some(existing) = find_notice(conn, institute_id, notice_id).await? else {
        return Ok(None);
    };

    let mut active = existing.into_active_model();
    active.title = Set(dto.title);
    active.description = Set(dto.description);
    active.is_published = Set(dto.is_published);
    active.publish_date = Set(dto.publish_date);
    active.updated_at = Set(time::OffsetDateTime::now_utc());

    active.update(conn).await.map(Some)
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_notice<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    institute_id: i32,
    notice_id: i32,
) -> Result<u64, sea_orm::DbErr> {
    let result = notices::Entity::delete_many()
        .filter(notices::Column::Id.eq(notice_id))
        .filter(notices::Column::InstituteId.eq(institute_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
