mod common;
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use backend::routes::photos::MAX_IMAGE_BODY;
use backend_test_support::error_body::assert_error_response;
use sea_orm::ConnectionTrait;
use support::auth::bearer;
use support::factory::{seed_institute, seed_staff};
use support::{build_test_context, init_app};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn public_id_of(image_url: &serde_json::Value) -> String {
    image_url
        .as_str()
        .and_then(|url| url.strip_prefix("memory://"))
        .expect("memory host url")
        .to_string()
}

#[actix_web::test]
async fn upload_stores_image_and_row() {
    let ctx = build_test_context().await;
    let staff = seed_staff(&ctx, seed_institute(&ctx).await).await;
    let app = init_app(ctx.data.clone()).await;

    let req = test::TestRequest::post()
        .uri("/photos?alt_text=Annual%20day")
        .insert_header(bearer(&staff.token))
        .insert_header(("content-type", "image/png"))
        .set_payload(PNG)
        .to_request();
    let photo = common::json_body(test::call_service(&app, req).await, 201).await;

    assert_eq!(photo["alt_text"], "Annual day");
    assert_eq!(photo["uploaded_by"], staff.id);
    assert_eq!(photo["institute_id"], staff.institute_id);
    assert!(photo.get("public_id").is_none());
    assert!(ctx.images.contains(&public_id_of(&photo["image_url"])).await);

    let req = test::TestRequest::get()
        .uri("/photos")
        .insert_header(bearer(&staff.token))
        .to_request();
    let listed = common::json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["id"], photo["id"]);
}

#[actix_web::test]
async fn upload_rejects_bad_bodies() {
    let ctx = build_test_context().await;
    let staff = seed_staff(&ctx, seed_institute(&ctx).await).await;
    let app = init_app(ctx.data.clone()).await;

    let req = test::TestRequest::post()
        .uri("/photos")
        .insert_header(bearer(&staff.token))
        .insert_header(("content-type", "application/pdf"))
        .set_payload(PNG)
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        Some("image type"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/photos")
        .insert_header(bearer(&staff.token))
        .insert_header(("content-type", "image/jpeg"))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::BAD_REQUEST, Some("empty")).await;

    let req = test::TestRequest::post()
        .uri("/photos")
        .insert_header(bearer(&staff.token))
        .insert_header(("content-type", "image/jpeg"))
        .set_payload(vec![0u8; MAX_IMAGE_BODY + 1])
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::BAD_REQUEST, Some("too large")).await;

    assert!(ctx.images.is_empty().await);
}

#[actix_web::test]
async fn replacing_image_drops_the_old_one() {
    let ctx = build_test_context().await;
    let staff = seed_staff(&ctx, seed_institute(&ctx).await).await;
    let app = init_app(ctx.data.clone()).await;

    let req = test::TestRequest::post()
        .uri("/photos")
        .insert_header(bearer(&staff.token))
        .insert_header(("content-type", "image/png"))
        .set_payload(PNG)
        .to_request();
    let original = common::json_body(test::call_service(&app, req).await, 201).await;
    let old_public_id = public_id_of(&original["image_url"]);

    let req = test::TestRequest::post()
        .uri(&format!("/photos/{}/image", original["id"]))
        .insert_header(bearer(&staff.token))
        .insert_header(("content-type", "image/webp"))
        .set_payload(&b"RIFF....WEBP"[..])
        .to_request();
    let replaced = common::json_body(test::call_service(&app, req).await, 200).await;

    assert_eq!(replaced["id"], original["id"]);
    assert_ne!(replaced["image_url"], original["image_url"]);
    assert!(!ctx.images.contains(&old_public_id).await);
    assert!(ctx.images.contains(&public_id_of(&replaced["image_url"])).await);
    assert_eq!(ctx.images.len().await, 1);
}

#[actix_web::test]
async fn delete_removes_row_and_image() {
    let ctx = build_test_context().await;
    let staff = seed_staff(&ctx, seed_institute(&ctx).await).await;
    let app = init_app(ctx.data.clone()).await;

    let req = test::TestRequest::post()
        .uri("/photos")
        .insert_header(bearer(&staff.token))
        .insert_header(("content-type", "image/png"))
        .set_payload(PNG)
        .to_request();
    let photo = common::json_body(test::call_service(&app, req).await, 201).await;
    let uri = format!("/photos/{}", photo["id"]);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&staff.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(ctx.images.is_empty().await);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&staff.token))
        .to_request();
    assert_error_response(test::call_service(&app, req).await, StatusCode::NOT_FOUND, None).await;
}

#[actix_web::test]
async fn image_host_failure_is_internal_error() {
    let ctx = build_test_context().await;
    let staff = seed_staff(&ctx, seed_institute(&ctx).await).await;
    let app = init_app(ctx.data.clone()).await;

    ctx.images.set_fail_uploads(true);

    let req = test::TestRequest::post()
        .uri("/photos")
        .insert_header(bearer(&staff.token))
        .insert_header(("content-type", "image/png"))
        .set_payload(PNG)
        .to_request();
    assert_error_response(
        test::call_service(&app, req).await,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some("internal server error"),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/photos")
        .insert_header(bearer(&staff.token))
        .to_request();
    let listed = common::json_body(test::call_service(&app, req).await, 200).await;
    assert_eq!(listed, serde_json::json!([]));
}

#[actix_web::test]
async fn failed_insert_deletes_the_uploaded_image() {
    let ctx = build_test_context().await;
    let staff = seed_staff(&ctx, seed_institute(&ctx).await).await;
    let app = init_app(ctx.data.clone()).await;

    // Break the database step so only the upload succeeds.
    let db = &ctx.state().db;
    db.execute_unprepared("DROP TABLE carousel_photos")
        .await
        .expect("drop carousel_photos");
    db.execute_unprepared("DROP TABLE photos")
        .await
        .expect("drop photos");

    let req = test::TestRequest::post()
        .uri("/photos")
        .insert_header(bearer(&staff.token))
        .insert_header(("content-type", "image/png"))
        .set_payload(PNG)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    assert!(ctx.images.is_empty().await);
}
