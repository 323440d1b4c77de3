//! SeaORM adapter for carousels and their photo slots.
//!
//! `carousel_photos` rows carry no tenant column. Every function touching
//! them takes the parent carousel id, which callers must already have
//! resolved within the tenant.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, NotSet,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{carousel_photos, carousels};

pub mod dto;

pub use dto::{CarouselCreate, CarouselPhotoCreate, CarouselPhotoUpdate, CarouselUpdate};

pub async fn create_carousel<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CarouselCreate,
) -> Result<carousels::Model, sea_orm::DbErr> {
    let carousel = carousels::ActiveModel {
        id: NotSet,
        institute_id: Set(dto.institute_id),
        title: Set(dto.title),
        is_active: Set(dto.is_active),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    carousel.insert(conn).await
}

pub async fn find_carousel<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    institute_id: i32,
    carousel_id: i32,
) -> Result<Option<carousels::Model>, sea_orm::DbErr> {
    carousels::Entity::find_by_id(carousel_id)
        .filter(carousels::Column::InstituteId.eq(institute_id))
        .one(conn)
        .await
}

pub async fn list_carousels<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    institute_id: i32,
) -> Result<Vec<carousels::Model>, sea_orm::DbErr> {
    carousels::Entity::find()
        .filter(carousels::Column::InstituteId.eq(institute_id))
        .order_by_asc(carousels::Column::Id)
        .all(conn)
        .await
}

pub async fn update_carousel<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    institute_id: i32,
    carousel_id: i32,
    dto: CarouselUpdate,
) -> Result<Option<carousels::Model>, sea_orm::DbErr> {
    let Some(existing) = find_carousel(conn, institute_id, carousel_id).await? else {
        return Ok(None);
    };

    let mut active = existing.into_active_model();
    if let Some(title) = dto.title {
        active.title = Set(title);
    }
    if let Some(is_active) = dto.is_active {
        active.is_active = Set(is_active);
    }

    active.update(conn).await.map(Some)
}

/// Slots are removed by the `ON DELETE CASCADE` foreign key.
pub async fn delete_carousel<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    institute_id: i32,
    carousel_id: i32,
) -> Result<u64, sea_orm::DbErr> {
    let result = carousels::Entity::delete_many()
        .filter(carousels::Column::Id.eq(carousel_id))
        .filter(carousels::Column::InstituteId.eq(institute_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn create_carousel_photo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CarouselPhotoCreate,
) -> Result<carousel_photos::Model, sea_orm::DbErr> {
    let slot = carousel_photos::ActiveModel {
        id: NotSet,
        carousel_id: Set(dto.carousel_id),
        photo_id: Set(dto.photo_id),
        display_text: Set(dto.display_text),
        display_order: Set(dto.display_order),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    slot.insert(conn).await
}

/// Ordered by `display_order`, ties broken by insertion.
pub async fn list_carousel_photos<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    carousel_id: i32,
) -> Result<Vec<carousel_photos::Model>, sea_orm::DbErr> {
    carousel_photos::Entity::find()
        .filter(carousel_photos::Column::CarouselId.eq(carousel_id))
        .order_by_asc(carousel_photos::Column::DisplayOrder)
        .order_by_asc(carousel_photos::Column::Id)
        .all(conn)
        .await
}

pub async fn find_carousel_photo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    carousel_id: i32,
    slot_id: i32,
) -> Result<Option<carousel_photos::Model>, sea_orm::DbErr> {
    carousel_photos::Entity::find_by_id(slot_id)
        .filter(carousel_photos::Column::CarouselId.eq(carousel_id))
        .one(conn)
        .await
}

pub async fn update_carousel_photo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    carousel_id: i32,
    slot_id: i32,
    dto: CarouselPhotoUpdate,
) -> Result<Option<carousel_photos::Model>, sea_orm::DbErr> {
    let Some(existing) = find_carousel_photo(conn, carousel_id, slot_id).await? else {
        return Ok(None);
    };

    let mut active = existing.into_active_model();
    active.display_text = Set(dto.display_text);
    active.display_order = Set(dto.display_order);

    active.update(conn).await.map(Some)
}

pub async fn delete_carousel_photo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    carousel_id: i32,
    slot_id: i32,
) -> Result<u64, sea_orm::DbErr> {
    let result = carousel_photos::Entity::delete_many()
        .filter(carousel_photos::Column::Id.eq(slot_id))
        .filter(carousel_photos::Column::CarouselId.eq(carousel_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
