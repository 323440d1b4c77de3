//! Startup seeding of the first administrator.

use tracing::info;

use super::users::{create_user, normalize_email, CreateUser};
use crate::auth::ADMIN_ROLE;
use crate::config::BootstrapConfig;
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::repos::{institutes, users};
use crate::state::app_state::AppState;

/// Create the configured institute and admin unless an account with the
/// admin email already exists. Safe to run on every start.
///
/// Returns `true` when an account was created.
pub async fn ensure_bootstrap_admin(
    state: &AppState,
    config: &BootstrapConfig,
) -> Result<bool, AppError> {
    let email = normalize_email(&config.admin_email);
    if users::find_credentials_by_email(&state.db, &email)
        .await?
        .is_some()
    {
        info!(email = %Redacted(&email), "bootstrap admin already present");
        return Ok(false);
    }

    let institute = match institutes::find_institute_by_name(&state.db, &config.institute_name).await? {
        Some(existing) => existing,
        None => institutes::create_institute(&state.db, &config.institute_name).await?,
    };

    let admin = create_user(
        state,
        institute.tenant(),
        CreateUser {
            name: config.admin_name.clone(),
            email,
            password: config.admin_password.clone(),
            role: ADMIN_ROLE.to_string(),
            is_active: true,
        },
    )
    .await?;

    info!(
        user_id = admin.id,
        institute_id = institute.id,
        institute = %institute.name,
        "bootstrap admin created"
    );
    Ok(true)
}
