//! Photo routes. Uploads carry the raw image as the request body with an
//! `image/*` content type; the optional alt text rides in the query string.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use serde::Deserialize;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{PathId, Session};
use crate::repos::photos as photos_repo;
use crate::services::photos as photos_service;
use crate::state::app_state::AppState;

/// Largest accepted image body.
pub const MAX_IMAGE_BODY: usize = 10 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub alt_text: Option<String>,
}

fn image_content_type(req: &HttpRequest) -> Result<String, AppError> {
    req.headers()
        .get("content-type")
        .and_then(|ct| ct.to_str().ok())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .filter(|ct| ct.starts_with("image/"))
        .ok_or_else(|| {
            AppError::bad_request(
                ErrorCode::UnsupportedMediaType,
                "content type must be an image type",
            )
        })
}

async fn read_image(mut payload: web::Payload) -> Result<Bytes, AppError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|_| {
            AppError::bad_request(ErrorCode::BadRequest, "failed to read request body")
        })?;
        if body.len() + chunk.len() > MAX_IMAGE_BODY {
            return Err(AppError::bad_request(
                ErrorCode::BadRequest,
                "image is too large",
            ));
        }
        body.extend_from_slice(&chunk);
    }
    if body.is_empty() {
        return Err(AppError::bad_request(ErrorCode::BadRequest, "image body is empty"));
    }
    Ok(body.freeze())
}

async fn upload_photo(
    session: Session,
    http_req: HttpRequest,
    query: web::Query<UploadQuery>,
    payload: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let content_type = image_content_type(&http_req)?;
    let image = read_image(payload).await?;
    let alt_text = query
        .into_inner()
        .alt_text
        .map(|alt| alt.trim().to_string())
        .filter(|alt| !alt.is_empty());

    let photo =
        photos_service::upload_photo(&app_state, &session, image, &content_type, alt_text).await?;
    Ok(HttpResponse::Created().json(photo))
}

async fn get_photo(
    session: Session,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let photo = photos_repo::find_photo(&app_state.db, session.tenant(), id.0).await?;
    Ok(HttpResponse::Ok().json(photo))
}

async fn list_photos(
    session: Session,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let photos = photos_repo::list_photos(&app_state.db, session.tenant()).await?;
    Ok(HttpResponse::Ok().json(photos))
}

async fn replace_image(
    session: Session,
    id: PathId,
    http_req: HttpRequest,
    payload: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let content_type = image_content_type(&http_req)?;
    let image = read_image(payload).await?;

    let photo = photos_service::replace_photo_image(
        &app_state,
        session.tenant(),
        id.0,
        image,
        &content_type,
    )
    .await?;
    Ok(HttpResponse::Ok().json(photo))
}

async fn delete_photo(
    session: Session,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    photos_service::delete_photo(&app_state, session.tenant(), id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Mounted under a `SessionAuth`-wrapped `/photos` scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(upload_photo))
            .route(web::get().to(list_photos)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_photo))
            .route(web::delete().to(delete_photo)),
    )
    .service(web::resource("/{id}/image").route(web::post().to(replace_image)));
}
