//! Positive integer ids taken from the route path.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

fn parse_positive(req: &HttpRequest, name: &str) -> Result<i32, AppError> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| AppError::bad_request(ErrorCode::BadRequest, format!("missing {name}")))?;

    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::bad_request(
            ErrorCode::BadRequest,
            format!("invalid {name}: {raw}"),
        )),
    }
}

/// `{id}` segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub i32);

impl FromRequest for PathId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_positive(req, "id").map(PathId))
    }
}

/// `{child_id}` segment of nested routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildId(pub i32);

impl FromRequest for ChildId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_positive(req, "child_id").map(ChildId))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[actix_web::test]
    async fn accepts_positive_ids() {
        let req = TestRequest::default()
            .param("id", "12")
            .param("child_id", "4")
            .to_http_request();
        assert_eq!(PathId::extract(&req).await.unwrap(), PathId(12));
        assert_eq!(ChildId::extract(&req).await.unwrap(), ChildId(4));
    }

    #[actix_web::test]
    async fn rejects_bad_ids() {
        for raw in ["0", "-3", "abc", "99999999999"] {
            let req = TestRequest::default().param("id", raw).to_http_request();
            let err = PathId::extract(&req).await.unwrap_err();
            assert_eq!(err.status(), actix_web::http::StatusCode::BAD_REQUEST, "{raw}");
        }
    }
}
