//! Carousel repository functions.
//!
//! Slot operations first resolve the parent carousel inside the tenant, so a
//! slot under another institute's carousel is never reachable.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::carousels_sea::{
    self as carousels_adapter, CarouselCreate, CarouselPhotoCreate, CarouselPhotoUpdate,
    CarouselUpdate,
};
use crate::adapters::photos_sea as photos_adapter;
use crate::auth::TenantId;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Carousel {
    pub id: i32,
    pub institute_id: i32,
    pub title: String,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselPhoto {
    pub id: i32,
    pub carousel_id: i32,
    pub photo_id: i32,
    pub display_text: Option<String>,
    pub display_order: i32,
}

/// A carousel with its slots in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselWithPhotos {
    #[serde(flatten)]
    pub carousel: Carousel,
    pub photos: Vec<CarouselPhoto>,
}

#[derive(Debug, Clone)]
pub struct NewCarouselPhoto {
    pub photo_id: i32,
    pub display_text: Option<String>,
    pub display_order: i32,
}

fn carousel_not_found(carousel_id: i32) -> DomainError {
    DomainError::not_found(
        NotFoundKind::Carousel,
        format!("carousel {carousel_id} not found"),
    )
}

fn slot_not_found(slot_id: i32) -> DomainError {
    DomainError::not_found(
        NotFoundKind::CarouselPhoto,
        format!("carousel photo {slot_id} not found"),
    )
}

pub async fn create_carousel<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    title: String,
    is_active: bool,
) -> Result<Carousel, DomainError> {
    let dto = CarouselCreate {
        institute_id: tenant.get(),
        title,
        is_active,
    };
    let carousel = carousels_adapter::create_carousel(conn, dto)
        .await
        .map_err(map_db_err)?;
    Ok(Carousel::from(carousel))
}

pub async fn find_carousel<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    carousel_id: i32,
) -> Result<Carousel, DomainError> {
    carousels_adapter::find_carousel(conn, tenant.get(), carousel_id)
        .await
        .map_err(map_db_err)?
        .map(Carousel::from)
        .ok_or_else(|| carousel_not_found(carousel_id))
}

pub async fn find_carousel_with_photos<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    carousel_id: i32,
) -> Result<CarouselWithPhotos, DomainError> {
    let carousel = find_carousel(conn, tenant, carousel_id).await?;
    let photos = carousels_adapter::list_carousel_photos(conn, carousel.id)
        .await
        .map_err(map_db_err)?;
    Ok(CarouselWithPhotos {
        carousel,
        photos: photos.into_iter().map(CarouselPhoto::from).collect(),
    })
}

pub async fn list_carousels<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
) -> Result<Vec<Carousel>, DomainError> {
    let carousels = carousels_adapter::list_carousels(conn, tenant.get())
        .await
        .map_err(map_db_err)?;
    Ok(carousels.into_iter().map(Carousel::from).collect())
}

pub async fn update_carousel<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    carousel_id: i32,
    update: CarouselUpdate,
) -> Result<Carousel, DomainError> {
    carousels_adapter::update_carousel(conn, tenant.get(), carousel_id, update)
        .await
        .map_err(map_db_err)?
        .map(Carousel::from)
        .ok_or_else(|| carousel_not_found(carousel_id))
}

pub async fn delete_carousel<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    carousel_id: i32,
) -> Result<(), DomainError> {
    let removed = carousels_adapter::delete_carousel(conn, tenant.get(), carousel_id)
        .await
        .map_err(map_db_err)?;
    if removed == 0 {
        return Err(carousel_not_found(carousel_id));
    }
    Ok(())
}

/// Both the carousel and the photo must belong to the tenant.
pub async fn add_carousel_photo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    carousel_id: i32,
    slot: NewCarouselPhoto,
) -> Result<CarouselPhoto, DomainError> {
    let carousel = find_carousel(conn, tenant, carousel_id).await?;

    let photo = photos_adapter::find_photo(conn, tenant.get(), slot.photo_id)
        .await
        .map_err(map_db_err)?;
    if photo.is_none() {
        return Err(DomainError::not_found(
            NotFoundKind::Photo,
            format!("photo {} not found", slot.photo_id),
        ));
    }

    let dto = CarouselPhotoCreate {
        carousel_id: carousel.id,
        photo_id: slot.photo_id,
        display_text: slot.display_text,
        display_order: slot.display_order,
    };
    let created = carousels_adapter::create_carousel_photo(conn, dto)
        .await
        .map_err(map_db_err)?;
    Ok(CarouselPhoto::from(created))
}

pub async fn update_carousel_photo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    carousel_id: i32,
    slot_id: i32,
    update: CarouselPhotoUpdate,
) -> Result<CarouselPhoto, DomainError> {
    let carousel = find_carousel(conn, tenant, carousel_id).await?;
    carousels_adapter::update_carousel_photo(conn, carousel.id, slot_id, update)
        .await
        .map_err(map_db_err)?
        .map(CarouselPhoto::from)
        .ok_or_else(|| slot_not_found(slot_id))
}

pub async fn remove_carousel_photo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    carousel_id: i32,
    slot_id: i32,
) -> Result<(), DomainError> {
    let carousel = find_carousel(conn, tenant, carousel_id).await?;
    let removed = carousels_adapter::delete_carousel_photo(conn, carousel.id, slot_id)
        .await
        .map_err(map_db_err)?;
    if removed == 0 {
        return Err(slot_not_found(slot_id));
    }
    Ok(())
}

impl From<crate::entities::carousels::Model> for Carousel {
    fn from(model: crate::entities::carousels::Model) -> Self {
        Self {
            id: model.id,
            institute_id: model.institute_id,
            title: model.title,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

impl From<crate::entities::carousel_photos::Model> for CarouselPhoto {
    fn from(model: crate::entities::carousel_photos::Model) -> Self {
        Self {
            id: model.id,
            carousel_id: model.carousel_id,
            photo_id: model.photo_id,
            display_text: model.display_text,
            display_order: model.display_order,
        }
    }
}
