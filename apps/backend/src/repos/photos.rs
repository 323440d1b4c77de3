//! Photo repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::photos_sea::{self as photos_adapter, PhotoCreate};
use crate::auth::TenantId;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;
use crate::media::UploadedImage;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Photo {
    pub id: i32,
    pub institute_id: i32,
    pub image_url: String,
    pub alt_text: Option<String>,
    pub uploaded_by: i32,
    #[serde(skip)]
    pub public_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
}

fn photo_not_found(photo_id: i32) -> DomainError {
    DomainError::not_found(NotFoundKind::Photo, format!("photo {photo_id} not found"))
}

pub async fn create_photo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    image: UploadedImage,
    alt_text: Option<String>,
    uploaded_by: i32,
) -> Result<Photo, DomainError> {
    let dto = PhotoCreate {
        institute_id: tenant.get(),
        image_url: image.url,
        public_id: image.public_id,
        alt_text,
        uploaded_by,
    };
    let photo = photos_adapter::create_photo(conn, dto)
        .await
        .map_err(map_db_err)?;
    Ok(Photo::from(photo))
}

pub async fn find_photo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    photo_id: i32,
) -> Result<Photo, DomainError> {
    photos_adapter::find_photo(conn, tenant.get(), photo_id)
        .await
        .map_err(map_db_err)?
        .map(Photo::from)
        .ok_or_else(|| photo_not_found(photo_id))
}

pub async fn list_photos<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
) -> Result<Vec<Photo>, DomainError> {
    let photos = photos_adapter::list_photos(conn, tenant.get())
        .await
        .map_err(map_db_err)?;
    Ok(photos.into_iter().map(Photo::from).collect())
}

pub async fn replace_photo_image<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    photo_id: i32,
    image: UploadedImage,
) -> Result<Photo, DomainError> {
    photos_adapter::update_photo_image(conn, tenant.get(), photo_id, image.url, image.public_id)
        .await
        .map_err(map_db_err)?
        .map(Photo::from)
        .ok_or_else(|| photo_not_found(photo_id))
}

pub async fn delete_photo<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    photo_id: i32,
) -> Result<(), DomainError> {
    let removed = photos_adapter::delete_photo(conn, tenant.get(), photo_id)
        .await
        .map_err(map_db_err)?;
    if removed == 0 {
        return Err(photo_not_found(photo_id));
    }
    Ok(())
}

impl From<crate::entities::photos::Model> for Photo {
    fn from(model: crate::entities::photos::Model) -> Self {
        Self {
            id: model.id,
            institute_id: model.institute_id,
            image_url: model.image_url,
            alt_text: model.alt_text,
            uploaded_by: model.uploaded_by,
            public_id: model.cloudinary_public_id,
            created_at: model.created_at,
        }
    }
}
