mod common;
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use serde_json::json;
use support::auth::bearer;
use support::factory::{seed_admin, seed_institute, seed_staff};
use support::{build_test_context, init_app};

#[actix_web::test]
async fn admin_manages_notices_end_to_end() {
    let ctx = build_test_context().await;
    let admin = seed_admin(&ctx, seed_institute(&ctx).await).await;
    let app = init_app(ctx.data.clone()).await;

    let req = test::TestRequest::post()
        .uri("/notices")
        .insert_header(bearer(&admin.token))
        .set_json(json!({
            "title": "  Sports day  ",
            "description": "Bring water bottles.",
            "is_published": true,
            "publish_date": "2025-03-14"
        }))
        .to_request();
    let created = common::json_body(test::call_service(&app, req).await, 201).await;
    let id = created["id"].as_i64().expect("id");
    assert_eq!(created["title"], "Sports day");
    assert_eq!(created["publish_date"], "2025-03-14");
    assert_eq!(created["is_published"], true);

    let uri = format!("/notices/{id}");

    // Full replacement: omitted optional fields are cleared.
    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&admin.token))
        .set_json(json!({ "title": "Sports day moved" }))
        .to_request();
    let updated = common::json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(updated["title"], "Sports day moved");
    assert_eq!(updated["description"], serde_json::Value::Null);
    assert_eq!(updated["publish_date"], serde_json::Value::Null);
    assert_eq!(updated["is_published"], false);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&admin.token))
        .to_request();
    let fetched = common::json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(fetched, updated);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&admin.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&admin.token))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::NOT_FOUND, Some("not found")).await;

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&admin.token))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::NOT_FOUND, None).await;
}

#[actix_web::test]
async fn list_is_newest_first() {
    let ctx = build_test_context().await;
    let admin = seed_admin(&ctx, seed_institute(&ctx).await).await;
    let app = init_app(ctx.data.clone()).await;

    for title in ["First notice", "Second notice", "Third notice"] {
        let req = test::TestRequest::post()
            .uri("/notices")
            .insert_header(bearer(&admin.token))
            .set_json(json!({ "title": title }))
            .to_request();
        common::json_body(test::call_service(&app, req).await, 201).await;
    }

    let req = test::TestRequest::get()
        .uri("/notices")
        .insert_header(bearer(&admin.token))
        .to_request();
    let listed = common::json_body(test::call_service(&app, req).await, 200).await;
    let titles: Vec<&str> = listed
        .as_array()
        .expect("array")
        .iter()
        .map(|n| n["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["Third notice", "Second notice", "First notice"]);
}

#[actix_web::test]
async fn staff_read_but_do_not_write() {
    let ctx = build_test_context().await;
    let institute_id = seed_institute(&ctx).await;
    let admin = seed_admin(&ctx, institute_id).await;
    let staff = seed_staff(&ctx, institute_id).await;
    let app = init_app(ctx.data.clone()).await;

    let req = test::TestRequest::post()
        .uri("/notices")
        .insert_header(bearer(&admin.token))
        .set_json(json!({ "title": "Holiday list" }))
        .to_request();
    let created = common::json_body(test::call_service(&app, req).await, 201).await;
    let uri = format!("/notices/{}", created["id"]);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&staff.token))
        .to_request();
    common::json_body(test::call_service(&app, req).await, 200).await;

    let req = test::TestRequest::post()
        .uri("/notices")
        .insert_header(bearer(&staff.token))
        .set_json(json!({ "title": "Unofficial notice" }))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::FORBIDDEN, None).await;

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&staff.token))
        .set_json(json!({ "title": "Edited by staff" }))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::FORBIDDEN, None).await;

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&staff.token))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::FORBIDDEN, None).await;
}

#[actix_web::test]
async fn invalid_notice_bodies_are_rejected() {
    let ctx = build_test_context().await;
    let admin = seed_admin(&ctx, seed_institute(&ctx).await).await;
    let app = init_app(ctx.data.clone()).await;

    let req = test::TestRequest::post()
        .uri("/notices")
        .insert_header(bearer(&admin.token))
        .set_json(json!({ "title": "Hi" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"][0]["field"], "title");
    assert_eq!(body["fields"][0]["validation"], "length");

    let req = test::TestRequest::post()
        .uri("/notices")
        .insert_header(bearer(&admin.token))
        .set_json(json!({ "title": "Bad date", "publish_date": "14/03/2025" }))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::BAD_REQUEST, None).await;

    // An empty date string means no date.
    let req = test::TestRequest::post()
        .uri("/notices")
        .insert_header(bearer(&admin.token))
        .set_json(json!({ "title": "No date", "publish_date": "" }))
        .to_request();
    let created = common::json_body(test::call_service(&app, req).await, 201).await;
    assert_eq!(created["publish_date"], serde_json::Value::Null);
}

#[actix_web::test]
async fn timestamp_publish_dates_are_accepted() {
    let ctx = build_test_context().await;
    let admin = seed_admin(&ctx, seed_institute(&ctx).await).await;
    let app = init_app(ctx.data.clone()).await;

    let req = test::TestRequest::post()
        .uri("/notices")
        .insert_header(bearer(&admin.token))
        .set_json(json!({ "title": "New year closure", "publish_date": "2025-01-01T00:00:00Z" }))
        .to_request();
    let created = common::json_body(test::call_service(&app, req).await, 201).await;
    assert_eq!(created["publish_date"], "2025-01-01");

    let req = test::TestRequest::put()
        .uri(&format!("/notices/{}", created["id"]))
        .insert_header(bearer(&admin.token))
        .set_json(json!({
            "title": "New year closure",
            "publish_date": "2025-01-02T09:30:00+05:30"
        }))
        .to_request();
    let updated = common::json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(updated["publish_date"], "2025-01-02");
}
