//! Photo operations that touch both the image host and the database.
//!
//! The image host is not transactional. When the database step fails after
//! an upload, the fresh image is deleted again so no orphan is left behind.

use bytes::Bytes;
use tracing::{info, warn};

use crate::auth::{SessionClaim, TenantId};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::media::{institute_folder, ImageHost, UploadedImage};
use crate::repos::photos::{self, Photo};
use crate::state::app_state::AppState;

/// Best-effort removal; failures are logged and swallowed.
async fn discard_image(images: &dyn ImageHost, public_id: &str, reason: &str) {
    if let Err(e) = images.delete(public_id).await {
        warn!(public_id, reason, error = %e, "failed to delete hosted image");
    }
}

async fn upload_image(
    images: &dyn ImageHost,
    tenant: TenantId,
    image: Bytes,
    content_type: &str,
) -> Result<UploadedImage, AppError> {
    images
        .upload(image, content_type, &institute_folder(tenant.get()))
        .await
        .map_err(|e| AppError::from(DomainError::from(e)))
}

pub async fn upload_photo(
    state: &AppState,
    claim: &SessionClaim,
    image: Bytes,
    content_type: &str,
    alt_text: Option<String>,
) -> Result<Photo, AppError> {
    let tenant = claim.tenant();
    let uploaded = upload_image(state.images.as_ref(), tenant, image, content_type).await?;
    let public_id = uploaded.public_id.clone();

    match photos::create_photo(&state.db, tenant, uploaded, alt_text, claim.subject_id()).await {
        Ok(photo) => {
            info!(photo_id = photo.id, institute_id = tenant.get(), "photo uploaded");
            Ok(photo)
        }
        Err(e) => {
            discard_image(state.images.as_ref(), &public_id, "compensate_failed_insert").await;
            Err(e.into())
        }
    }
}

/// Upload the new image, repoint the row, then drop the old image.
pub async fn replace_photo_image(
    state: &AppState,
    tenant: TenantId,
    photo_id: i32,
    image: Bytes,
    content_type: &str,
) -> Result<Photo, AppError> {
    let existing = photos::find_photo(&state.db, tenant, photo_id).await?;

    let uploaded = upload_image(state.images.as_ref(), tenant, image, content_type).await?;
    let new_public_id = uploaded.public_id.clone();

    let updated = match photos::replace_photo_image(&state.db, tenant, photo_id, uploaded).await {
        Ok(photo) => photo,
        Err(e) => {
            discard_image(state.images.as_ref(), &new_public_id, "compensate_failed_update")
                .await;
            return Err(e.into());
        }
    };

    if let Some(old_public_id) = existing.public_id.as_deref() {
        discard_image(state.images.as_ref(), old_public_id, "replaced").await;
    }

    info!(photo_id, institute_id = tenant.get(), "photo image replaced");
    Ok(updated)
}

/// Remove the row, then the hosted image.
pub async fn delete_photo(state: &AppState, tenant: TenantId, photo_id: i32) -> Result<(), AppError> {
    let existing = photos::find_photo(&state.db, tenant, photo_id).await?;
    photos::delete_photo(&state.db, tenant, photo_id).await?;

    if let Some(public_id) = existing.public_id.as_deref() {
        discard_image(state.images.as_ref(), public_id, "photo_deleted").await;
    }

    info!(photo_id, institute_id = tenant.get(), "photo deleted");
    Ok(())
}
