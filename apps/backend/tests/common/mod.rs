#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for every test binary that includes this module
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Assert a 2xx-or-expected status and parse the JSON body.
pub async fn json_body<B: MessageBody>(resp: ServiceResponse<B>, expected: u16) -> Value {
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    assert_eq!(
        status,
        expected,
        "unexpected status, body was: {}",
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("response body should be JSON")
}
