mod common;
mod support;

use actix_web::test;
use backend::config::BootstrapConfig;
use backend::services::bootstrap::ensure_bootstrap_admin;
use serde_json::json;
use support::{build_test_context, init_app};

fn config() -> BootstrapConfig {
    BootstrapConfig {
        institute_name: "Springfield Academy".to_string(),
        admin_name: "First Admin".to_string(),
        admin_email: "Root@Springfield.test".to_string(),
        admin_password: "change-me-now".to_string(),
    }
}

#[actix_web::test]
async fn bootstrap_runs_once() {
    let ctx = build_test_context().await;

    assert!(ensure_bootstrap_admin(ctx.state(), &config()).await.expect("first run"));
    assert!(!ensure_bootstrap_admin(ctx.state(), &config()).await.expect("second run"));

    let app = init_app(ctx.data.clone()).await;
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "root@springfield.test", "password": "change-me-now" }))
        .to_request();
    let body = common::json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body["role"], "admin");
    assert_eq!(body["name"], "First Admin");
}

#[actix_web::test]
async fn bootstrap_reuses_an_existing_institute() {
    let ctx = build_test_context().await;
    let existing = backend::adapters::institutes_sea::create_institute(
        &ctx.state().db,
        "Springfield Academy",
    )
    .await
    .expect("seed institute");

    assert!(ensure_bootstrap_admin(ctx.state(), &config()).await.expect("bootstrap"));

    let app = init_app(ctx.data.clone()).await;
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "root@springfield.test", "password": "change-me-now" }))
        .to_request();
    let body = common::json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(body["institute_id"], existing.id);
}
