use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use validator::Validate;

use crate::error::AppError;
use crate::extractors::{Session, ValidatedJson};
use crate::services::auth::login as login_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(with = "time::serde::rfc3339")]
    pub token_expires_at: OffsetDateTime,
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: String,
    pub institute_id: i32,
}

/// Exchange email and password for a session token.
async fn login(
    req: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = login_service(&app_state, &req.email, &req.password).await?;

    let response = LoginResponse {
        token: outcome.issued.token,
        token_expires_at: outcome.issued.claim.expires_at(),
        id: outcome.user.id,
        email: outcome.user.email,
        name: outcome.user.name,
        role: outcome.user.role,
        institute_id: outcome.user.institute_id,
    };
    Ok(HttpResponse::Ok().json(response))
}

/// The caller's own claim as bound by the session middleware.
async fn me(session: Session) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(session.into_inner()))
}

pub fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/login").route(web::post().to(login)));
}

/// Mounted under a `SessionAuth`-wrapped `/me` scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(me)));
}
