//! Credential login.

use actix_web::web;
use tracing::{error, info};

use super::users::normalize_email;
use crate::auth::{IssuedToken, SessionSubject};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::users::{self, User};
use crate::state::app_state::AppState;

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub issued: IssuedToken,
    pub user: User,
}

/// Check `email`/`password` and issue a session token.
///
/// An unknown email and a wrong password produce the same 401, and both pay
/// for one Argon2 verification. A disabled account is only reported once the
/// password has been proven.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
    let email = normalize_email(email);
    let credentials = users::find_credentials_by_email(&state.db, &email).await?;

    let hasher = state.passwords.clone();
    let password = password.to_owned();

    let Some(credentials) = credentials else {
        web::block(move || hasher.verify_dummy(&password))
            .await
            .map_err(blocking_failed)?;
        security::login_failed("unknown_email", &email);
        return Err(AppError::invalid_credentials());
    };

    let stored_hash = credentials.password_hash.clone();
    let matches = web::block(move || hasher.verify(&password, &stored_hash))
        .await
        .map_err(blocking_failed)??;

    if !matches {
        security::login_failed("bad_password", &email);
        return Err(AppError::invalid_credentials());
    }

    let user = credentials.user;
    if !user.is_active {
        security::login_failed("account_disabled", &email);
        return Err(AppError::account_disabled());
    }

    let issued = state.tokens.issue(SessionSubject {
        subject_id: user.id,
        email: user.email.clone(),
        display_name: user.name.clone(),
        role: user.role.clone(),
        tenant_id: user.institute_id,
    })?;

    info!(
        user_id = user.id,
        institute_id = user.institute_id,
        email = %Redacted(&user.email),
        "login succeeded"
    );

    Ok(LoginOutcome { issued, user })
}

fn blocking_failed(e: actix_web::error::BlockingError) -> AppError {
    error!(error = %e, "password verification task failed");
    AppError::internal(ErrorCode::InternalError, "password verification task failed")
}
