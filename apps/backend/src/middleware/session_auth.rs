//! Session authentication middleware for protected scopes.
//!
//! Per request, in order:
//! 1. take the token from `Authorization: Bearer <token>`, falling back to
//!    the `token` query parameter when the header is absent or not a bearer
//!    value; neither present is a 401 "token required";
//! 2. verify it with the [`TokenAuthority`](crate::auth::TokenAuthority);
//!    failure is a 401 "invalid or expired token";
//! 3. insert the resulting [`SessionClaim`] into request extensions;
//! 4. call the wrapped service.
//!
//! Role and tenant checks are left to handlers. Rejected requests never
//! reach the handler; they are answered here with the rendered error
//! response.

use std::collections::HashMap;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::SessionClaim;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::security;
use crate::state::app_state::AppState;

const BEARER_PREFIX: &str = "Bearer ";
const TOKEN_QUERY_KEY: &str = "token";

/// Where a token was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCarrier {
    Header,
    Query,
}

impl TokenCarrier {
    fn as_str(self) -> &'static str {
        match self {
            TokenCarrier::Header => "header",
            TokenCarrier::Query => "query",
        }
    }
}

pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware { service }))
    }
}

pub struct SessionAuthMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let claim = match authenticate(&req) {
            Ok(claim) => claim,
            Err(e) => {
                // Rendered when polled, inside the request's trace scope.
                return Box::pin(async move { Ok(req.error_response(e).map_into_right_body()) });
            }
        };

        req.extensions_mut().insert(claim);
        let fut = self.service.call(req);
        Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
    }
}

fn authenticate(req: &ServiceRequest) -> Result<SessionClaim, AppError> {
    let (token, carrier) =
        extract_token(req.headers().get(header::AUTHORIZATION), req.uri().query())
            .ok_or_else(AppError::token_required)?;

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal(ErrorCode::InternalError, "AppState not available"))?;

    state.tokens.verify(&token).map_err(|e| {
        security::token_rejected(carrier.as_str());
        e
    })
}

/// Header first, then query string. A header that is present but not a
/// bearer value does not block the query fallback.
pub fn extract_token(
    auth_header: Option<&HeaderValue>,
    query: Option<&str>,
) -> Option<(String, TokenCarrier)> {
    let from_header = auth_header
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    if let Some(token) = from_header {
        return Some((token.to_string(), TokenCarrier::Header));
    }

    let params = web::Query::<HashMap<String, String>>::from_query(query?).ok()?;
    params
        .get(TOKEN_QUERY_KEY)
        .filter(|value| !value.is_empty())
        .map(|value| (value.clone(), TokenCarrier::Query))
}
