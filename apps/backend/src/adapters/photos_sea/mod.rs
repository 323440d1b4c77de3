//! SeaORM adapter for photos.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, NotSet,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::photos;

#[derive(Debug, Clone)]
pub struct PhotoCreate {
    pub institute_id: i32,
    pub image_url: String,
    pub public_id: String,
    pub alt_text: Option<String>,
    pub uploaded_by: i32,
}

pub async fn create_photo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PhotoCreate,
) -> Result<photos::Model, sea_orm::DbErr> {
    let photo = photos::ActiveModel {
        id: NotSet,
        institute_id: Set(dto.institute_id),
        image_url: Set(dto.image_url),
        alt_text: Set(dto.alt_text),
        uploaded_by: Set(dto.uploaded_by),
        cloudinary_public_id: Set(Some(dto.public_id)),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    photo.insert(conn).await
}

pub async fn find_photo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    institute_id: i32,
    photo_id: i32,
) -> Result<Option<photos::Model>, sea_orm::DbErr> {
    photos::Entity::find_by_id(photo_id)
        .filter(photos::Column::InstituteId.eq(institute_id))
        .one(conn)
        .await
}

pub async fn list_photos<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    institute_id: i32,
) -> Result<Vec<photos::Model>, sea_orm::DbErr> {
    photos::Entity::find()
        .filter(photos::Column::InstituteId.eq(institute_id))
        .order_by_desc(photos::Column::CreatedAt)
        .order_by_desc(photos::Column::Id)
        .all(conn)
        .await
}

/// Point the row at a newly hosted image.
pub async fn update_photo_image<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    institute_id: i32,
    photo_id: i32,
    image_url: String,
    public_id: String,
) -> Result<Option<photos::Model>, sea_orm::DbErr> {
    let Some(existing) = find_photo(conn, institute_id, photo_id).await? else {
        return Ok(None);
    };

    let mut active = existing.into_active_model();
    active.image_url = Set(image_url);
    active.cloudinary_public_id = Set(Some(public_id));

    active.update(conn).await.map(Some)
}

pub async fn delete_photo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    institute_id: i32,
    photo_id: i32,
) -> Result<u64, sea_orm::DbErr> {
    let result = photos::Entity::delete_many()
        .filter(photos::Column::Id.eq(photo_id))
        .filter(photos::Column::InstituteId.eq(institute_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
