use actix_web::web;
use tracing::{error, info};

use crate::auth::{PasswordHasher, TenantId};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::repos::users::{self, NewUser, User};
use crate::state::app_state::AppState;

/// Plaintext input for a new account.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub is_active: bool,
}

/// Emails are compared and stored lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Hash off the async executor; Argon2 is deliberately slow.
pub async fn hash_password(hasher: &PasswordHasher, password: String) -> Result<String, AppError> {
    let hasher = hasher.clone();
    web::block(move || hasher.hash(&password))
        .await
        .map_err(|e| {
            error!(error = %e, "password hashing task failed");
            AppError::internal(ErrorCode::InternalError, "password hashing task failed")
        })?
}

pub async fn create_user(
    state: &AppState,
    tenant: TenantId,
    input: CreateUser,
) -> Result<User, AppError> {
    let email = normalize_email(&input.email);
    let password_hash = hash_password(&state.passwords, input.password).await?;

    let user = users::create_user(
        &state.db,
        tenant,
        NewUser {
            name: input.name.trim().to_string(),
            email,
            password_hash,
            role: input.role,
            is_active: input.is_active,
        },
    )
    .await?;

    info!(
        user_id = user.id,
        institute_id = user.institute_id,
        email = %Redacted(&user.email),
        role = %user.role,
        "user created"
    );
    Ok(user)
}

pub async fn change_password(
    state: &AppState,
    tenant: TenantId,
    user_id: i32,
    password: String,
) -> Result<(), AppError> {
    // 404 before spending a hash on a user that is not there.
    users::find_user(&state.db, tenant, user_id).await?;

    let password_hash = hash_password(&state.passwords, password).await?;
    users::update_password(&state.db, tenant, user_id, password_hash).await?;

    info!(user_id, institute_id = tenant.get(), "password changed");
    Ok(())
}
