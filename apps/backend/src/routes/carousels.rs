use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use validator::Validate;

use crate::adapters::carousels_sea::{CarouselPhotoUpdate, CarouselUpdate};
use crate::error::AppError;
use crate::extractors::{ChildId, PathId, Session, ValidatedJson};
use crate::repos::carousels::{self as carousels_repo, NewCarouselPhoto};
use crate::state::app_state::AppState;

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCarouselRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCarouselRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddCarouselPhotoRequest {
    #[validate(range(min = 1, message = "photo_id must be positive"))]
    pub photo_id: i32,
    pub display_text: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, message = "display_order must not be negative"))]
    pub display_order: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCarouselPhotoRequest {
    pub display_text: Option<String>,
    #[validate(range(min = 0, message = "display_order must not be negative"))]
    pub display_order: i32,
}

async fn create_carousel(
    session: Session,
    req: ValidatedJson<CreateCarouselRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    let carousel = carousels_repo::create_carousel(
        &app_state.db,
        session.tenant(),
        req.title.trim().to_string(),
        req.is_active,
    )
    .await?;
    Ok(HttpResponse::Created().json(carousel))
}

async fn list_carousels(
    session: Session,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let carousels = carousels_repo::list_carousels(&app_state.db, session.tenant()).await?;
    Ok(HttpResponse::Ok().json(carousels))
}

async fn get_carousel(
    session: Session,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let carousel =
        carousels_repo::find_carousel_with_photos(&app_state.db, session.tenant(), id.0).await?;
    Ok(HttpResponse::Ok().json(carousel))
}

async fn update_carousel(
    session: Session,
    id: PathId,
    req: ValidatedJson<UpdateCarouselRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    let update = CarouselUpdate {
        title: req.title.map(|title| title.trim().to_string()),
        is_active: req.is_active,
    };
    let carousel =
        carousels_repo::update_carousel(&app_state.db, session.tenant(), id.0, update).await?;
    Ok(HttpResponse::Ok().json(carousel))
}

async fn delete_carousel(
    session: Session,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    carousels_repo::delete_carousel(&app_state.db, session.tenant(), id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn add_photo(
    session: Session,
    id: PathId,
    req: ValidatedJson<AddCarouselPhotoRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    let slot = carousels_repo::add_carousel_photo(
        &app_state.db,
        session.tenant(),
        id.0,
        NewCarouselPhoto {
            photo_id: req.photo_id,
            display_text: req.display_text,
            display_order: req.display_order,
        },
    )
    .await?;
    Ok(HttpResponse::Created().json(slot))
}

async fn update_photo(
    session: Session,
    id: PathId,
    child: ChildId,
    req: ValidatedJson<UpdateCarouselPhotoRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    let slot = carousels_repo::update_carousel_photo(
        &app_state.db,
        session.tenant(),
        id.0,
        child.0,
        CarouselPhotoUpdate {
            display_text: req.display_text,
            display_order: req.display_order,
        },
    )
    .await?;
    Ok(HttpResponse::Ok().json(slot))
}

async fn remove_photo(
    session: Session,
    id: PathId,
    child: ChildId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    carousels_repo::remove_carousel_photo(&app_state.db, session.tenant(), id.0, child.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Mounted under a `SessionAuth`-wrapped `/carousels` scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_carousel))
            .route(web::get().to(list_carousels)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_carousel))
            .route(web::put().to(update_carousel))
            .route(web::delete().to(delete_carousel)),
    )
    .service(web::resource("/{id}/photos").route(web::post().to(add_photo)))
    .service(
        web::resource("/{id}/photos/{child_id}")
            .route(web::put().to(update_photo))
            .route(web::delete().to(remove_photo)),
    );
}
