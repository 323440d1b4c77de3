mod common;
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use serde_json::json;
use support::auth::bearer;
use support::factory::{seed_admin, seed_institute};
use support::{build_test_context, init_app};

#[actix_web::test]
async fn notices_of_another_institute_are_invisible() {
    let ctx = build_test_context().await;
    let first = seed_admin(&ctx, seed_institute(&ctx).await).await;
    let second = seed_admin(&ctx, seed_institute(&ctx).await).await;
    let app = init_app(ctx.data.clone()).await;

    let req = test::TestRequest::post()
        .uri("/notices")
        .insert_header(bearer(&first.token))
        .set_json(json!({ "title": "Exam schedule", "is_published": true }))
        .to_request();
    let created = common::json_body(test::call_service(&app, req).await, 201).await;
    let notice_id = created["id"].as_i64().expect("id");
    assert_eq!(created["institute_id"], first.institute_id);

    let uri = format!("/notices/{notice_id}");

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&second.token))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::NOT_FOUND, None).await;

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&second.token))
        .set_json(json!({ "title": "Hijacked", "is_published": false }))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::NOT_FOUND, None).await;

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&second.token))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::NOT_FOUND, None).await;

    let req = test::TestRequest::get()
        .uri("/notices")
        .insert_header(bearer(&second.token))
        .to_request();
    let listed = common::json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(listed, json!([]));

    // Still intact for its owner.
    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&first.token))
        .to_request();
    let fetched = common::json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(fetched["title"], "Exam schedule");
}

#[actix_web::test]
async fn users_of_another_institute_are_invisible() {
    let ctx = build_test_context().await;
    let first = seed_admin(&ctx, seed_institute(&ctx).await).await;
    let second = seed_admin(&ctx, seed_institute(&ctx).await).await;
    let app = init_app(ctx.data.clone()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", first.id))
        .insert_header(bearer(&second.token))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::NOT_FOUND, None).await;

    let req = test::TestRequest::get()
        .uri(&format!("/users?email={}", first.email))
        .insert_header(bearer(&second.token))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::NOT_FOUND, None).await;

    let req = test::TestRequest::put()
        .uri(&format!("/users/{}/disable", first.id))
        .insert_header(bearer(&second.token))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::NOT_FOUND, None).await;

    let req = test::TestRequest::get()
        .uri("/institutes/users")
        .insert_header(bearer(&second.token))
        .to_request();
    let listed = common::json_body(test::call_service(&app, req).await, 200).await;
    let ids: Vec<i64> = listed
        .as_array()
        .expect("array")
        .iter()
        .map(|u| u["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(ids, vec![i64::from(second.id)]);
}

#[actix_web::test]
async fn photos_and_carousels_of_another_institute_are_invisible() {
    let ctx = build_test_context().await;
    let first = seed_admin(&ctx, seed_institute(&ctx).await).await;
    let second = seed_admin(&ctx, seed_institute(&ctx).await).await;
    let app = init_app(ctx.data.clone()).await;

    let req = test::TestRequest::post()
        .uri("/photos")
        .insert_header(bearer(&first.token))
        .insert_header(("content-type", "image/png"))
        .set_payload(vec![0x89, b'P', b'N', b'G'])
        .to_request();
    let photo = common::json_body(test::call_service(&app, req).await, 201).await;
    let photo_id = photo["id"].as_i64().expect("id");

    let req = test::TestRequest::delete()
        .uri(&format!("/photos/{photo_id}"))
        .insert_header(bearer(&second.token))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::NOT_FOUND, None).await;
    assert_eq!(ctx.images.len().await, 1);

    // Second institute's carousel cannot reference the first one's photo.
    let req = test::TestRequest::post()
        .uri("/carousels")
        .insert_header(bearer(&second.token))
        .set_json(json!({ "title": "Front page" }))
        .to_request();
    let carousel = common::json_body(test::call_service(&app, req).await, 201).await;
    let carousel_id = carousel["id"].as_i64().expect("id");

    let req = test::TestRequest::post()
        .uri(&format!("/carousels/{carousel_id}/photos"))
        .insert_header(bearer(&second.token))
        .set_json(json!({ "photo_id": photo_id, "display_order": 1 }))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::NOT_FOUND, Some("photo")).await;

    // Nor can the first institute touch the second one's carousel.
    let req = test::TestRequest::get()
        .uri(&format!("/carousels/{carousel_id}"))
        .insert_header(bearer(&first.token))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::NOT_FOUND, None).await;
}
