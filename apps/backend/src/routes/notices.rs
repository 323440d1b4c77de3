use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use time::Date;
use validator::Validate;

use crate::auth::require_admin;
use crate::error::AppError;
use crate::extractors::{PathId, Session, ValidatedJson};
use crate::repos::notices::{self as notices_repo, date_format, NoticeDraft};
use crate::state::app_state::AppState;

/// Body for both create and update; update replaces every field.
#[derive(Debug, Deserialize, Validate)]
pub struct NoticeRequest {
    #[validate(length(min = 3, message = "title must be at least 3 characters"))]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default, with = "date_format")]
    pub publish_date: Option<Date>,
}

impl From<NoticeRequest> for NoticeDraft {
    fn from(req: NoticeRequest) -> Self {
        Self {
            title: req.title.trim().to_string(),
            description: req.description,
            is_published: req.is_published,
            publish_date: req.publish_date,
        }
    }
}

async fn create_notice(
    session: Session,
    req: ValidatedJson<NoticeRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;

    let notice =
        notices_repo::create_notice(&app_state.db, session.tenant(), req.into_inner().into())
            .await?;
    Ok(HttpResponse::Created().json(notice))
}

async fn get_notice(
    session: Session,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let notice = notices_repo::find_notice(&app_state.db, session.tenant(), id.0).await?;
    Ok(HttpResponse::Ok().json(notice))
}

async fn list_notices(
    session: Session,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let notices = notices_repo::list_notices(&app_state.db, session.tenant()).await?;
    Ok(HttpResponse::Ok().json(notices))
}

async fn update_notice(
    session: Session,
    id: PathId,
    req: ValidatedJson<NoticeRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;

    let notice = notices_repo::update_notice(
        &app_state.db,
        session.tenant(),
        id.0,
        req.into_inner().into(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(notice))
}

async fn delete_notice(
    session: Session,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;

    notices_repo::delete_notice(&app_state.db, session.tenant(), id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Mounted under a `SessionAuth`-wrapped `/notices` scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_notice))
            .route(web::get().to(list_notices)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_notice))
            .route(web::put().to(update_notice))
            .route(web::delete().to(delete_notice)),
    );
}
