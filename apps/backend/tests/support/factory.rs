//! Seed data for integration tests. Rows are written through the adapters so
//! tests start from a known database state without going through the API.

use backend::adapters::users_sea::{self, UserCreate};
use backend::adapters::institutes_sea;
use backend::auth::ADMIN_ROLE;
use backend::entities::users;
use backend_test_support::unique_helpers::{unique_email, unique_str};

use super::auth::mint_token;
use super::TestContext;

pub const TEST_PASSWORD: &str = "password123";

/// A seeded account with a ready-to-use session token.
#[derive(Debug, Clone)]
pub struct SeededUser {
    pub id: i32,
    pub institute_id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub token: String,
    pub model: users::Model,
}

pub async fn seed_institute(ctx: &TestContext) -> i32 {
    institutes_sea::create_institute(&ctx.state().db, &unique_str("institute"))
        .await
        .expect("seed institute")
        .id
}

pub async fn seed_user_with(
    ctx: &TestContext,
    institute_id: i32,
    role: &str,
    is_active: bool,
) -> SeededUser {
    let email = unique_email(role);
    let password_hash = ctx
        .state()
        .passwords
        .hash(TEST_PASSWORD)
        .expect("hash test password");

    let user = users_sea::create_user(
        &ctx.state().db,
        UserCreate {
            institute_id,
            name: format!("Test {role}"),
            email: email.clone(),
            password_hash,
            role: role.to_string(),
            is_active,
        },
    )
    .await
    .expect("seed user");

    let token = mint_token(ctx, &user);
    SeededUser {
        id: user.id,
        institute_id,
        name: user.name.clone(),
        email,
        role: user.role.clone(),
        token,
        model: user,
    }
}

pub async fn seed_admin(ctx: &TestContext, institute_id: i32) -> SeededUser {
    seed_user_with(ctx, institute_id, ADMIN_ROLE, true).await
}

pub async fn seed_staff(ctx: &TestContext, institute_id: i32) -> SeededUser {
    seed_user_with(ctx, institute_id, "staff", true).await
}
