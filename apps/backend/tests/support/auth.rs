//! Session token helpers for tests

use actix_web::http::header;
use backend::auth::SessionSubject;
use backend::entities::users;
use time::{Duration, OffsetDateTime};

use super::TestContext;

fn subject_for(user: &users::Model) -> SessionSubject {
    SessionSubject {
        subject_id: user.id,
        email: user.email.clone(),
        display_name: user.name.clone(),
        role: user.role.clone(),
        tenant_id: user.institute_id,
    }
}

/// Mint a valid session token for a stored user.
pub fn mint_token(ctx: &TestContext, user: &users::Model) -> String {
    ctx.state()
        .tokens
        .issue(subject_for(user))
        .expect("should mint token successfully")
        .token
}

/// Mint a token whose envelope expired an hour ago.
pub fn mint_expired_token(ctx: &TestContext, user: &users::Model) -> String {
    let tokens = &ctx.state().tokens;
    let issued_at = OffsetDateTime::now_utc() - tokens.token_duration() - Duration::hours(1);
    tokens
        .issue_at(subject_for(user), issued_at)
        .expect("should mint expired token successfully")
        .token
}

/// `Authorization: Bearer <token>` header pair.
pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}
