use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use validator::Validate;

use crate::adapters::users_sea::UserUpdate;
use crate::auth::{require_admin, require_self_or_admin};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{PathId, Session, ValidatedJson};
use crate::repos::users as users_repo;
use crate::services::users::{self as users_service, normalize_email, CreateUser};
use crate::state::app_state::AppState;

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, message = "name must be at least 3 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, message = "name must be at least 3 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "role must not be empty"))]
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

async fn create_user(
    session: Session,
    req: ValidatedJson<CreateUserRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;

    let req = req.into_inner();
    let user = users_service::create_user(
        &app_state,
        session.tenant(),
        CreateUser {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
            is_active: req.is_active,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(user))
}

async fn get_user(
    session: Session,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = users_repo::find_user(&app_state.db, session.tenant(), id.0).await?;
    Ok(HttpResponse::Ok().json(user))
}

async fn find_user_by_email(
    session: Session,
    query: web::Query<EmailQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let email = query
        .email
        .as_deref()
        .map(normalize_email)
        .filter(|email| !email.is_empty())
        .ok_or_else(|| AppError::bad_request(ErrorCode::BadRequest, "email query parameter is required"))?;

    let user = users_repo::find_user_by_email(&app_state.db, session.tenant(), &email).await?;
    Ok(HttpResponse::Ok().json(user))
}

async fn list_institute_users(
    session: Session,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;

    let users = users_repo::list_users(&app_state.db, session.tenant()).await?;
    Ok(HttpResponse::Ok().json(users))
}

async fn update_user(
    session: Session,
    id: PathId,
    req: ValidatedJson<UpdateUserRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_self_or_admin(&session, id.0)?;

    let req = req.into_inner();
    if req.role.is_some() || req.is_active.is_some() {
        require_admin(&session)?;
    }

    let update = UserUpdate {
        name: req.name.map(|name| name.trim().to_string()),
        email: req.email.as_deref().map(normalize_email),
        role: req.role,
        is_active: req.is_active,
    };
    if update.is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::BadRequest,
            "no fields to update",
        ));
    }

    let user = users_repo::update_user(&app_state.db, session.tenant(), id.0, update).await?;
    Ok(HttpResponse::Ok().json(user))
}

async fn change_password(
    session: Session,
    id: PathId,
    req: ValidatedJson<ChangePasswordRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_self_or_admin(&session, id.0)?;

    users_service::change_password(&app_state, session.tenant(), id.0, req.into_inner().password)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn disable_user(
    session: Session,
    id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_admin(&session)?;

    let user = users_repo::disable_user(&app_state.db, session.tenant(), id.0).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Mounted under a `SessionAuth`-wrapped `/users` scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_user))
            .route(web::get().to(find_user_by_email)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_user))
            .route(web::put().to(update_user)),
    )
    .service(web::resource("/{id}/password").route(web::put().to(change_password)))
    .service(web::resource("/{id}/disable").route(web::put().to(disable_user)));
}

/// Mounted under a `SessionAuth`-wrapped `/institutes` scope.
pub fn configure_institute_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/users").route(web::get().to(list_institute_users)));
}
