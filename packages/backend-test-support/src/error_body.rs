//! Assertions for the backend's error contract.
//!
//! Every failure leaves the service as `{"error": true, "message": "..."}`
//! with an `x-trace-id` header; validation failures add a `fields` array.
//! These helpers check that shape without depending on backend types.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ErrorBodyLike {
    error: bool,
    message: String,
    #[serde(default)]
    fields: Vec<Value>,
}

/// Check status, trace header and body. Returns the message so callers can
/// make further assertions on it.
pub fn assert_error_body_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body_bytes: &[u8],
    expected_status: StatusCode,
    expected_message_contains: Option<&str>,
) -> String {
    let body_str = String::from_utf8(body_bytes.to_vec()).expect("body should be valid UTF-8");

    assert_eq!(
        status, expected_status,
        "unexpected status, body was: {body_str}"
    );

    let parsed: ErrorBodyLike = serde_json::from_str(&body_str)
        .unwrap_or_else(|e| panic!("body should be the error shape ({e}): {body_str}"));

    assert!(parsed.error, "error flag must be true");
    assert!(!parsed.message.is_empty(), "message must not be empty");
    if status != StatusCode::BAD_REQUEST {
        assert!(
            parsed.fields.is_empty(),
            "only 400 responses may list fields: {body_str}"
        );
    }

    let trace_id = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");
    assert!(!trace_id.is_empty(), "x-trace-id must not be empty");

    if let Some(expected) = expected_message_contains {
        assert!(
            parsed.message.contains(expected),
            "expected message to contain '{}', got '{}'",
            expected,
            parsed.message
        );
    }

    parsed.message
}

/// Same as [`assert_error_body_from_parts`], consuming a `ServiceResponse`
/// as returned by `actix_web::test::call_service`.
pub async fn assert_error_response<B>(
    resp: ServiceResponse<B>,
    expected_status: StatusCode,
    expected_message_contains: Option<&str>,
) -> String
where
    B: MessageBody,
{
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_error_body_from_parts(
        status,
        &headers,
        &body,
        expected_status,
        expected_message_contains,
    )
}
